/// Implementation of `ttlv inspect`.
///
/// Decodes the whole message and prints one line per item, indented by
/// nesting depth.
///
/// # Output format
///
/// ```text
/// RequestMessage (Structure, 3 items)
///   RequestHeader (Structure, 2 items)
///     ProtocolVersion (Structure, 2 items)
///       ProtocolVersionMajor (Integer) = 1
///       ProtocolVersionMinor (Integer) = 4
///     BatchCount (Integer) = 1
///   ...
/// ---
/// 184 bytes
/// ```
use std::fmt::Write as _;

use anyhow::{Context, Result};
use ttlv_wire::{Item, Value, decode_with};

use crate::InspectArgs;

/// Byte strings longer than this are elided in the listing.
const MAX_BYTES_SHOWN: usize = 32;

/// Run the `ttlv inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the message fails to
/// decode.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = args.input.read()?;
    let item = decode_with(&bytes, &args.input.decoder_config())
        .with_context(|| format!("failed to decode {}", args.input.file.display()))?;

    let mut out = String::new();
    render_item(&mut out, &item, 0);
    print!("{out}");
    println!("---");
    println!("{} bytes", bytes.len());
    Ok(())
}

fn render_item(out: &mut String, item: &Item, depth: usize) {
    let indent = "  ".repeat(depth);
    let item_type = item.value.item_type();
    match &item.value {
        Value::Structure(children) => {
            let _ = writeln!(
                out,
                "{indent}{} ({item_type}, {} item{})",
                item.tag,
                children.len(),
                if children.len() == 1 { "" } else { "s" }
            );
            for child in children {
                render_item(out, child, depth + 1);
            }
        }
        value => {
            let _ = writeln!(out, "{indent}{} ({item_type}) = {}", item.tag, scalar(value));
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Integer(v) => v.to_string(),
        Value::LongInteger(v) | Value::DateTime(v) => v.to_string(),
        Value::Enumeration(v) => format!("{v:#010X}"),
        Value::Interval(v) => format!("{v}s"),
        Value::Boolean(v) => v.to_string(),
        Value::TextString(v) => format!("{v:?}"),
        Value::BigInteger(bytes) | Value::ByteString(bytes) => {
            let shown = &bytes[..bytes.len().min(MAX_BYTES_SHOWN)];
            let ellipsis = if bytes.len() > MAX_BYTES_SHOWN { "…" } else { "" };
            format!("0x{}{ellipsis} ({} bytes)", ttlv_wire::encode_hex(shown), bytes.len())
        }
        Value::Structure(_) => String::new(),
    }
}
