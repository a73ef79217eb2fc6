use std::fmt;
use std::panic::Location;

use backtrace::{Backtrace, BacktraceSymbol};

use crate::config::TraceConfig;

/// Symbol prefixes of this crate's own frames.
const INTERNAL_PREFIXES: [&str; 2] = ["ttlv_errors::", "<ttlv_errors::"];

/// Frames the capture passes through on its way down from the caller:
/// the unwinder, and std glue such as `ResultExt` impls on `Result`.
/// Only dropped while they lead the trace.
const GLUE_PREFIXES: [&str; 4] = ["backtrace::", "<backtrace::", "core::", "<core::"];

/// A call-site record taken when an error is wrapped.
///
/// The caller location is always present. The backtrace, when enabled,
/// is stored unresolved: symbol lookup is the expensive part, and it is
/// deferred until the trace is actually displayed.
pub(crate) struct Trace {
    location: &'static Location<'static>,
    frames: Option<Backtrace>,
    skip: usize,
    max_frames: usize,
}

impl Trace {
    #[inline(never)]
    pub(crate) fn capture(location: &'static Location<'static>, skip: usize) -> Self {
        Self::capture_with(location, skip, TraceConfig::current())
    }

    #[inline(never)]
    pub(crate) fn capture_with(
        location: &'static Location<'static>,
        skip: usize,
        config: &TraceConfig,
    ) -> Self {
        Self {
            location,
            frames: if config.capture_backtrace {
                Some(Backtrace::new_unresolved())
            } else {
                None
            },
            skip,
            max_frames: config.max_frames,
        }
    }

    pub(crate) fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// One resolved symbol, flattened out of its frame so that inlined
/// functions count as separate entries.
struct Entry {
    name: String,
    file: Option<String>,
    line: Option<u32>,
}

impl Entry {
    fn from_symbol(symbol: &BacktraceSymbol) -> Self {
        Self {
            name: symbol
                .name()
                .map_or_else(|| "<unknown>".to_owned(), |name| format!("{name:#}")),
            file: symbol.filename().map(|path| path.display().to_string()),
            line: symbol.lineno(),
        }
    }

    fn is_internal(&self) -> bool {
        !self.name.contains("::tests::")
            && INTERNAL_PREFIXES
                .iter()
                .any(|prefix| self.name.starts_with(prefix))
    }

    /// Part of the capture path rather than the caller's code.
    fn is_machinery(&self) -> bool {
        self.is_internal()
            || GLUE_PREFIXES
                .iter()
                .any(|prefix| self.name.starts_with(prefix))
    }
}

impl fmt::Display for Trace {
    /// Renders as:
    ///
    /// ```text
    /// at crates/ttlv-wire/src/decoder.rs:97:21
    ///    0: ttlv_wire::decoder::Decoder::item
    ///              at /src/crates/ttlv-wire/src/decoder.rs:97
    ///    1: ...
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}", self.location)?;

        let Some(frames) = &self.frames else {
            return Ok(());
        };

        let mut resolved = frames.clone();
        resolved.resolve();

        let entries: Vec<Entry> = resolved
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            .map(Entry::from_symbol)
            .collect();
        let start = entries
            .iter()
            .take_while(|entry| entry.is_machinery())
            .count();

        for (i, entry) in entries[start..]
            .iter()
            .skip(self.skip)
            .take(self.max_frames)
            .enumerate()
        {
            write!(f, "\n{i:>4}: {}", entry.name)?;
            if let Some(file) = &entry.file {
                write!(f, "\n             at {file}")?;
                if let Some(line) = entry.line {
                    write!(f, ":{line}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> TraceConfig {
        TraceConfig {
            capture_backtrace: true,
            max_frames: 8,
        }
    }

    #[test]
    fn location_only_when_disabled() {
        let trace = Trace::capture_with(Location::caller(), 0, &TraceConfig::default());
        let rendered = trace.to_string();
        assert!(rendered.starts_with("at "));
        assert!(rendered.contains("trace.rs"));
        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn frame_count_is_bounded() {
        let trace = Trace::capture_with(Location::caller(), 0, &enabled());
        let numbered = trace
            .to_string()
            .lines()
            .filter(|line| line.trim_start().starts_with(|c: char| c.is_ascii_digit()))
            .count();
        assert!(numbered <= 8);
    }

    /// Names of the numbered frames in a rendered trace.
    fn frame_names(rendered: &str) -> Vec<String> {
        rendered
            .lines()
            .filter_map(|line| {
                let (index, name) = line.trim_start().split_once(": ")?;
                index.parse::<usize>().ok().map(|_| name.to_owned())
            })
            .collect()
    }

    #[inline(never)]
    fn capture_in_helper(skip: usize) -> String {
        Trace::capture_with(Location::caller(), skip, &enabled()).to_string()
    }

    #[test]
    fn first_frame_is_the_caller() {
        let names = frame_names(&Trace::capture_with(Location::caller(), 0, &enabled()).to_string());
        assert!(
            names[0].ends_with("first_frame_is_the_caller"),
            "unexpected frames: {names:#?}"
        );
        assert!(names.iter().all(|name| !name.starts_with("ttlv_errors::trace::Trace")));
        assert!(names.iter().all(|name| !name.starts_with("backtrace::")));
    }

    #[test]
    fn skip_hides_helper_frames() {
        let shown = frame_names(&capture_in_helper(0));
        assert!(shown[0].ends_with("capture_in_helper"), "unexpected frames: {shown:#?}");

        let skipped = frame_names(&capture_in_helper(1));
        assert!(
            skipped[0].ends_with("skip_hides_helper_frames"),
            "unexpected frames: {skipped:#?}"
        );
        assert!(skipped.iter().all(|name| !name.contains("capture_in_helper")));
    }

    #[test]
    fn internal_entries_detected() {
        let entry = Entry {
            name: "ttlv_errors::tagging::tag_error_skipping".to_owned(),
            file: None,
            line: None,
        };
        assert!(entry.is_internal());

        let test_entry = Entry {
            name: "ttlv_errors::trace::tests::skip_drops_frames".to_owned(),
            file: None,
            line: None,
        };
        assert!(!test_entry.is_internal());

        let caller = Entry {
            name: "ttlv_wire::decoder::decode".to_owned(),
            file: None,
            line: None,
        };
        assert!(!caller.is_internal());
        assert!(!caller.is_machinery());

        let result_ext = Entry {
            name: "<core::result::Result<T,E> as ttlv_errors::tagging::ResultExt<T>>::tag_err"
                .to_owned(),
            file: None,
            line: None,
        };
        assert!(!result_ext.is_internal());
        assert!(result_ext.is_machinery());
    }
}
