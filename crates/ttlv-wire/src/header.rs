use ttlv_errors::{CodecError, Error, ResultReason, Tag, tag_error};
use ttlv_types::ItemType;

/// Item header size in bytes (fixed).
pub const HEADER_SIZE: usize = 8;

/// Values are padded so every item starts on an 8-byte boundary.
pub const ALIGNMENT: usize = 8;

/// TTLV item header: the first 8 bytes of every item.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 3 bytes │ Tag (big-endian)                 │
/// │ 0x03   │ 1 byte  │ Item type                        │
/// │ 0x04   │ 4 bytes │ Value length, excluding padding  │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemHeader {
    pub tag: Tag,
    pub item_type: ItemType,
    pub len: u32,
}

impl ItemHeader {
    /// Append the 8-byte header to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.tag.to_wire_bytes());
        buf.push(self.item_type.to_wire());
        buf.extend_from_slice(&self.len.to_be_bytes());
    }

    /// Parse a header from the first 8 bytes of `buf`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::HeaderTruncated`] if fewer than 8 bytes remain.
    /// - [`CodecError::InvalidTag`] if the tag is outside the standard and
    ///   extension ranges.
    /// - [`CodecError::InvalidType`] if the type byte is unknown.
    /// - [`CodecError::InvalidLen`] if a fixed-size type declares the
    ///   wrong length.
    pub fn read_from(buf: &[u8]) -> Result<Self, Error> {
        let Some(&[t0, t1, t2, type_byte, l0, l1, l2, l3]) = buf.first_chunk::<HEADER_SIZE>() else {
            return Err(tag_error(CodecError::HeaderTruncated, Tag::NONE, buf)
                .with_result_reason(ResultReason::InvalidMessage));
        };

        let tag = Tag::from_wire_bytes([t0, t1, t2]);
        if !tag.is_valid() {
            return Err(tag_error(CodecError::InvalidTag, tag, &())
                .with_result_reason(ResultReason::InvalidField));
        }

        let item_type = ItemType::from_wire(type_byte).map_err(|_| {
            tag_error(CodecError::InvalidType, tag, &type_byte)
                .with_result_reason(ResultReason::InvalidField)
        })?;

        let len = u32::from_be_bytes([l0, l1, l2, l3]);
        if item_type.fixed_len().is_some_and(|fixed| fixed != len) {
            return Err(tag_error(CodecError::InvalidLen, tag, &item_type)
                .with_result_reason(ResultReason::InvalidMessage));
        }

        Ok(Self {
            tag,
            item_type,
            len,
        })
    }

    /// Bytes the value occupies on the wire, including padding.
    ///
    /// Structures are never padded: their length is the sum of their
    /// children, which are already aligned.
    pub fn padded_len(&self) -> usize {
        let len = self.len as usize;
        match self.item_type {
            ItemType::Structure => len,
            _ => len.div_ceil(ALIGNMENT) * ALIGNMENT,
        }
    }
}
