use crate::error::Error;

/// Append `name: value` on a new line, skipping empty values.
pub(crate) fn append_field(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    if !name.is_empty() {
        out.push_str(name);
        out.push_str(": ");
    }
    out.push_str(value);
}

/// Render a full diagnostic for `err`.
///
/// Sections appear in a fixed order, and only when non-empty:
///
/// ```text
/// KeyValue: invalid length          ← developer message (what)
/// User Message: ...                 ← end-user message
/// Tag: KeyValue                     ← context (where)
/// Type: ttlv_wire::value::Value
/// Kind: enum
/// Path: KeyBlock
///                                   ← blank line
/// at crates/ttlv-wire/src/...       ← trace (how we got here)
/// ```
///
/// `None` renders as `""`.
pub fn details(err: Option<&Error>) -> String {
    let Some(err) = err else {
        return String::new();
    };

    let mut out = String::new();
    append_field(&mut out, "", &err.message());
    append_field(&mut out, "User Message", err.user_message());
    if let Some(ctx) = err.error_context() {
        append_field(&mut out, "", &ctx.render());
    }

    let trace = err.stacktrace();
    if !trace.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&trace);
    }
    out
}

impl Error {
    /// [`details`] for a known error.
    pub fn details(&self) -> String {
        details(Some(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodecError, ErrorContext, Tag, tag_error};

    #[test]
    fn none_is_empty() {
        assert_eq!(details(None), "");
    }

    #[test]
    fn bare_sentinel_is_just_the_message() {
        let err = Error::from(CodecError::InvalidTag);
        assert_eq!(err.details(), "invalid tag");
    }

    #[test]
    fn user_message_is_labelled() {
        let err = Error::from(CodecError::InvalidTag).with_user_message("bad request");
        insta::assert_snapshot!(err.details(), @r"
        invalid tag
        User Message: bad request
        ");
    }

    #[test]
    fn context_follows_message() {
        let err = Error::from(CodecError::InvalidLen)
            .with_error_context(ErrorContext::new(Tag::KEY_VALUE).with_path(["KeyBlock"]));
        insta::assert_snapshot!(err.details(), @r"
        invalid length
        Tag: KeyValue
        Path: KeyBlock
        ");
    }

    #[test]
    fn trace_comes_last_after_blank_line() {
        let err = tag_error(CodecError::InvalidLen, Tag::KEY_VALUE, &());
        let out = err.details();
        let (head, trace) = out.split_once("\n\n").unwrap();
        assert_eq!(head, "KeyValue: invalid length\nTag: KeyValue");
        assert!(trace.starts_with("at "));
        assert!(trace.contains("details.rs"));
    }

    #[test]
    fn empty_message_section_is_omitted() {
        let err = Error::from(CodecError::TagConflict)
            .with_error_context(ErrorContext::new(Tag::ATTRIBUTE));
        assert_eq!(err.details(), "Tag: Attribute");
    }

    #[test]
    fn append_field_skips_empty() {
        let mut out = String::new();
        append_field(&mut out, "A", "");
        assert_eq!(out, "");
        append_field(&mut out, "A", "1");
        append_field(&mut out, "", "2");
        assert_eq!(out, "A: 1\n2");
    }
}
