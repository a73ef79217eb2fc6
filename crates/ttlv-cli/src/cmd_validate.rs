/// Implementation of `ttlv validate`.
///
/// Decodes the message and reports either success checkmarks (`✓`) or
/// the full diagnostic of the first failure (`✗`). Exits 1 on failure
/// (the dispatcher in `main.rs` converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Decoded: RequestMessage (Structure)
/// ✓ Items: 12 items, max depth 3
/// ✓ Length: 184 bytes consumed
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: KeyMaterial: value truncated
/// ✗ Result reason: InvalidMessage
///
/// KeyMaterial: value truncated
/// Tag: KeyMaterial
/// Type: ttlv_types::item_type::ItemType
/// Kind: enum
/// Path: KeyBlock.KeyValue
///
/// at crates/ttlv-wire/src/decoder.rs:71:24
/// ```
use anyhow::{Result, anyhow};
use ttlv_errors::ResultReason;
use ttlv_wire::{Item, decode_with};

use crate::ValidateArgs;

/// Run the `ttlv validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes = args.input.read()?;

    match decode_with(&bytes, &args.input.decoder_config()) {
        Ok(item) => {
            let (count, depth) = measure(&item, 0);
            println!("✓ Decoded: {} ({})", item.tag, item.value.item_type());
            println!(
                "✓ Items: {count} item{}, max depth {depth}",
                if count == 1 { "" } else { "s" }
            );
            println!("✓ Length: {} bytes consumed", bytes.len());
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {e}");
            let reason = e.result_reason();
            if reason != ResultReason::Unset {
                println!("✗ Result reason: {reason}");
            }
            println!();
            println!("{}", e.details());
            Err(anyhow!("validation failed"))
        }
    }
}

/// Item count and maximum structure depth below `item`.
fn measure(item: &Item, depth: usize) -> (usize, usize) {
    item.children()
        .iter()
        .map(|child| measure(child, depth + 1))
        .fold((1, depth), |(count, max), (n, d)| (count + n, max.max(d)))
}
