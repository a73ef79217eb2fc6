use tracing::{debug, trace};
use ttlv_errors::{CodecError, Error, ResultExt, ResultReason, Tag, tag_error};
use ttlv_types::ItemType;

use crate::config::DecoderConfig;
use crate::header::{HEADER_SIZE, ItemHeader};
use crate::value::{Item, Value};

/// Decode one complete TTLV item from `buf` with default limits.
///
/// # Errors
///
/// See [`decode_with`].
pub fn decode(buf: &[u8]) -> Result<Item, Error> {
    decode_with(buf, &DecoderConfig::default())
}

/// Decode one complete TTLV item from `buf`.
///
/// The whole buffer must be consumed. Failures come back tagged with the
/// failing item's tag and value type; each enclosing structure adds its
/// own tag to the context path on the way out, so the outermost context
/// reads as a breadcrumb down to the failing field.
///
/// # Errors
///
/// - [`CodecError::HeaderTruncated`] / [`CodecError::ValueTruncated`] when
///   the buffer ends early.
/// - [`CodecError::InvalidTag`], [`CodecError::InvalidType`],
///   [`CodecError::InvalidLen`] for malformed headers, big integers whose
///   length is not a multiple of 8, trailing bytes, or nesting deeper
///   than `config.max_depth`.
/// - [`CodecError::InvalidType`] for a boolean other than 0 or 1.
/// - A [`std::str::Utf8Error`] root for text strings that are not UTF-8.
pub fn decode_with(buf: &[u8], config: &DecoderConfig) -> Result<Item, Error> {
    let result = Decoder { config, depth: 0 }.item(buf).and_then(|(item, consumed)| {
        match buf.get(consumed..) {
            Some([]) | None => Ok(item),
            Some(rest) => Err(tag_error(CodecError::InvalidLen, Tag::NONE, rest)
                .prepend(format_args!("{} trailing bytes after {}", rest.len(), item.tag))
                .with_result_reason(ResultReason::InvalidMessage)),
        }
    });

    if let Err(err) = &result {
        debug!(error = %err, reason = %err.result_reason(), "decode failed");
    }
    result
}

struct Decoder<'a> {
    config: &'a DecoderConfig,
    depth: usize,
}

impl Decoder<'_> {
    /// Decode the item at the start of `buf`, returning it and the bytes
    /// consumed including padding.
    fn item(&mut self, buf: &[u8]) -> Result<(Item, usize), Error> {
        let header = ItemHeader::read_from(buf)?;
        trace!(
            tag = %header.tag,
            item_type = %header.item_type,
            len = header.len,
            depth = self.depth,
            "item header"
        );

        let consumed = HEADER_SIZE + header.padded_len();
        let Some(padded) = buf.get(HEADER_SIZE..consumed) else {
            return Err(tag_error(CodecError::ValueTruncated, header.tag, &header.item_type)
                .with_result_reason(ResultReason::InvalidMessage));
        };
        let body = &padded[..header.len as usize];

        let value = self.value(&header, body)?;
        Ok((Item::new(header.tag, value), consumed))
    }

    fn value(&mut self, header: &ItemHeader, body: &[u8]) -> Result<Value, Error> {
        let value = match header.item_type {
            ItemType::Structure => Value::Structure(self.structure(header.tag, body)?),
            ItemType::Integer => Value::Integer(i32::from_be_bytes(fixed(header, body)?)),
            ItemType::LongInteger => Value::LongInteger(i64::from_be_bytes(fixed(header, body)?)),
            ItemType::Enumeration => Value::Enumeration(u32::from_be_bytes(fixed(header, body)?)),
            ItemType::Interval => Value::Interval(u32::from_be_bytes(fixed(header, body)?)),
            ItemType::DateTime => Value::DateTime(i64::from_be_bytes(fixed(header, body)?)),
            ItemType::Boolean => match u64::from_be_bytes(fixed(header, body)?) {
                0 => Value::Boolean(false),
                1 => Value::Boolean(true),
                _ => {
                    return Err(tag_error(CodecError::InvalidType, header.tag, body)
                        .with_result_reason(ResultReason::InvalidField));
                }
            },
            ItemType::BigInteger => {
                if body.len() % 8 != 0 {
                    return Err(tag_error(CodecError::InvalidLen, header.tag, &header.item_type)
                        .with_result_reason(ResultReason::InvalidMessage));
                }
                Value::BigInteger(body.to_vec())
            }
            ItemType::TextString => {
                let text = std::str::from_utf8(body)
                    .tag_err(header.tag, body)
                    .with_result_reason(ResultReason::InvalidField)?;
                Value::TextString(text.to_owned())
            }
            ItemType::ByteString => Value::ByteString(body.to_vec()),
        };
        Ok(value)
    }

    fn structure(&mut self, tag: Tag, mut body: &[u8]) -> Result<Vec<Item>, Error> {
        if self.depth >= self.config.max_depth {
            return Err(tag_error(CodecError::InvalidLen, tag, &ItemType::Structure)
                .with_user_message(format!(
                    "structures are nested deeper than {} levels",
                    self.config.max_depth
                ))
                .with_result_reason(ResultReason::InvalidMessage));
        }

        self.depth += 1;
        let mut children = Vec::new();
        while !body.is_empty() {
            let (child, consumed) = self.item(body).push_path(tag)?;
            children.push(child);
            body = &body[consumed..];
        }
        self.depth -= 1;

        Ok(children)
    }
}

/// View a fixed-size body as an array. The header has already checked
/// the length, so a mismatch here means the header check was bypassed.
fn fixed<const N: usize>(header: &ItemHeader, body: &[u8]) -> Result<[u8; N], Error> {
    body.try_into().map_err(|_| {
        tag_error(CodecError::InvalidLen, header.tag, &header.item_type)
            .with_result_reason(ResultReason::InvalidMessage)
    })
}
