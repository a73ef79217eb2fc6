use tracing::debug;
use ttlv_errors::{CodecError, Error, ResultExt, ResultReason, Tag, tag_error};

use crate::header::{ALIGNMENT, HEADER_SIZE, ItemHeader};
use crate::value::{Item, Value};

/// Encode `item` into a fresh buffer.
///
/// # Errors
///
/// See [`encode_into`].
pub fn encode(item: &Item) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    encode_into(item, &mut buf)?;
    Ok(buf)
}

/// Append the wire form of `item` to `buf`.
///
/// On failure `buf` is truncated back to its original length.
///
/// # Errors
///
/// - [`CodecError::NoTag`] for an item tagged [`Tag::NONE`].
/// - [`CodecError::InvalidTag`] for a tag outside the valid ranges.
/// - [`CodecError::InvalidLen`] for a big integer whose length is not a
///   multiple of 8, or a value longer than `u32::MAX` bytes.
pub fn encode_into(item: &Item, buf: &mut Vec<u8>) -> Result<(), Error> {
    let start = buf.len();
    let result = write_item(item, buf);
    if let Err(err) = &result {
        debug!(error = %err, tag = %item.tag, "encode failed");
        buf.truncate(start);
    }
    result
}

fn write_item(item: &Item, buf: &mut Vec<u8>) -> Result<(), Error> {
    if item.tag.is_none() {
        return Err(tag_error(CodecError::NoTag, item.tag, &item.value)
            .with_result_reason(ResultReason::InvalidField));
    }
    if !item.tag.is_valid() {
        return Err(tag_error(CodecError::InvalidTag, item.tag, &item.value)
            .with_result_reason(ResultReason::InvalidField));
    }

    let item_type = item.value.item_type();
    let header_at = buf.len();
    ItemHeader {
        tag: item.tag,
        item_type,
        len: 0,
    }
    .write_to(buf);

    let body_at = buf.len();
    match &item.value {
        Value::Structure(children) => {
            for child in children {
                write_item(child, buf).push_path(item.tag)?;
            }
        }
        Value::Integer(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::LongInteger(v) | Value::DateTime(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Enumeration(v) | Value::Interval(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Boolean(v) => buf.extend_from_slice(&u64::from(*v).to_be_bytes()),
        Value::BigInteger(bytes) => {
            if bytes.len() % ALIGNMENT != 0 {
                return Err(tag_error(CodecError::InvalidLen, item.tag, bytes)
                    .with_result_reason(ResultReason::InvalidField));
            }
            buf.extend_from_slice(bytes);
        }
        Value::TextString(text) => buf.extend_from_slice(text.as_bytes()),
        Value::ByteString(bytes) => buf.extend_from_slice(bytes),
    }

    let len = buf.len() - body_at;
    let Ok(wire_len) = u32::try_from(len) else {
        return Err(tag_error(CodecError::InvalidLen, item.tag, &item.value)
            .with_result_reason(ResultReason::InvalidMessage));
    };
    buf[header_at + 4..header_at + HEADER_SIZE].copy_from_slice(&wire_len.to_be_bytes());

    // structures are made of aligned children already
    buf.resize(buf.len() + (len.next_multiple_of(ALIGNMENT) - len), 0);
    Ok(())
}
