//! Shared message fixtures for the integration tests and benches.

use ttlv_types::Tag;
use ttlv_wire::{Item, Value, encode};

/// A `SymmetricKey` holding a 128-bit AES key block.
///
/// ```text
/// SymmetricKey
/// └── KeyBlock
///     ├── KeyFormatType        Enumeration
///     ├── KeyValue
///     │   └── KeyMaterial      ByteString (16 bytes)
///     ├── CryptographicAlgorithm Enumeration
///     └── CryptographicLength  Integer
/// ```
pub fn symmetric_key() -> Item {
    Item::structure(
        Tag::SYMMETRIC_KEY,
        vec![Item::structure(
            Tag::KEY_BLOCK,
            vec![
                Item::new(Tag::KEY_FORMAT_TYPE, Value::Enumeration(0x01)),
                Item::structure(
                    Tag::KEY_VALUE,
                    vec![Item::new(Tag::KEY_MATERIAL, Value::ByteString(vec![0x5A; 16]))],
                ),
                Item::new(Tag::CRYPTOGRAPHIC_ALGORITHM, Value::Enumeration(0x03)),
                Item::new(Tag::CRYPTOGRAPHIC_LENGTH, Value::Integer(128)),
            ],
        )],
    )
}

/// A one-item request message with a protocol version header.
pub fn request_message(batch_items: usize) -> Item {
    let header = Item::structure(
        Tag::REQUEST_HEADER,
        vec![
            Item::structure(
                Tag::PROTOCOL_VERSION,
                vec![
                    Item::new(Tag::PROTOCOL_VERSION_MAJOR, Value::Integer(1)),
                    Item::new(Tag::PROTOCOL_VERSION_MINOR, Value::Integer(4)),
                ],
            ),
            Item::new(
                Tag::BATCH_COUNT,
                Value::Integer(i32::try_from(batch_items).unwrap_or(i32::MAX)),
            ),
        ],
    );

    let mut children = vec![header];
    children.extend((0..batch_items).map(|i| {
        Item::structure(
            Tag::BATCH_ITEM,
            vec![
                Item::new(Tag::OPERATION, Value::Enumeration(0x0A)),
                Item::structure(
                    Tag::REQUEST_PAYLOAD,
                    vec![Item::new(
                        Tag::UNIQUE_IDENTIFIER,
                        Value::TextString(format!("key-{i}")),
                    )],
                ),
            ],
        )
    }));

    Item::structure(Tag::REQUEST_MESSAGE, children)
}

/// Encode a fixture that is known to be well formed.
///
/// # Panics
///
/// Panics if the fixture does not encode, which means the fixture itself
/// is broken.
pub fn encoded(item: &Item) -> Vec<u8> {
    match encode(item) {
        Ok(bytes) => bytes,
        Err(e) => panic!("fixture failed to encode:\n{e:?}"),
    }
}

/// Byte offset of the first header carrying `tag`, scanning headers in
/// document order.
pub fn header_offset(bytes: &[u8], tag: Tag) -> Option<usize> {
    let want = tag.to_wire_bytes();
    let mut at = 0;
    while let Some(header) = bytes.get(at..at + 8) {
        if header[..3] == want {
            return Some(at);
        }
        let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;
        at += 8;
        // structures: step into the children; scalars: skip the padded value
        if header[3] != 0x01 {
            at += len.div_ceil(8) * 8;
        }
    }
    None
}
