//! Hex text forms of encoded messages, as found in logs and test vectors.

use ttlv_errors::{CodecError, Error, ResultReason, Tag, tag_error};

/// Parse hex text into bytes.
///
/// Whitespace anywhere is ignored, as is a leading `0x`, so dumps
/// wrapped across lines or grouped into words can be pasted directly.
///
/// # Errors
///
/// [`CodecError::InvalidHexString`] for odd-length input or non-hex
/// characters.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, Error> {
    let trimmed = input.trim_start();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    ::hex::decode(&compact).map_err(|e| {
        tag_error(CodecError::InvalidHexString, Tag::NONE, input)
            .with_message(format!("invalid hex string: {e}"))
            .with_result_reason(ResultReason::InvalidMessage)
    })
}

/// Uppercase hex with no separators.
pub fn encode_hex(bytes: &[u8]) -> String {
    ::hex::encode_upper(bytes)
}
