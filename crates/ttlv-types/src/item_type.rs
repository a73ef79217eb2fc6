wire_enum! {
  /// TTLV item types.
  ///
  /// The type byte is the fourth byte of every item header and decides
  /// how the value bytes that follow are interpreted.
  ///
  /// ```text
  /// ┌──────┬──────────────┬─────────────┬──────────────────────────────┐
  /// │ Wire │ Variant      │ Length      │ Payload                      │
  /// ├──────┼──────────────┼─────────────┼──────────────────────────────┤
  /// │ 0x01 │ Structure    │ variable    │ Nested TTLV items            │
  /// │ 0x02 │ Integer      │ 4           │ i32, big-endian              │
  /// │ 0x03 │ LongInteger  │ 8           │ i64, big-endian              │
  /// │ 0x04 │ BigInteger   │ n × 8       │ Two's complement, big-endian │
  /// │ 0x05 │ Enumeration  │ 4           │ u32, big-endian              │
  /// │ 0x06 │ Boolean      │ 8           │ 0 or 1                       │
  /// │ 0x07 │ TextString   │ variable    │ UTF-8                        │
  /// │ 0x08 │ ByteString   │ variable    │ Raw bytes                    │
  /// │ 0x09 │ DateTime     │ 8           │ i64 seconds since epoch      │
  /// │ 0x0A │ Interval     │ 4           │ u32 seconds                  │
  /// └──────┴──────────────┴─────────────┴──────────────────────────────┘
  /// ```
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum ItemType: u8 {
    Structure = 0x01 => "Structure",
    Integer = 0x02 => "Integer",
    LongInteger = 0x03 => "LongInteger",
    BigInteger = 0x04 => "BigInteger",
    Enumeration = 0x05 => "Enumeration",
    Boolean = 0x06 => "Boolean",
    TextString = 0x07 => "TextString",
    ByteString = 0x08 => "ByteString",
    DateTime = 0x09 => "DateTime",
    Interval = 0x0A => "Interval",
  }
}

impl ItemType {
    /// The exact value length this type requires, if it is fixed.
    ///
    /// `BigInteger` is variable but must be a multiple of 8; that rule is
    /// enforced by the codec, not here.
    pub fn fixed_len(self) -> Option<u32> {
        match self {
            Self::Integer | Self::Enumeration | Self::Interval => Some(4),
            Self::LongInteger | Self::Boolean | Self::DateTime => Some(8),
            Self::Structure | Self::BigInteger | Self::TextString | Self::ByteString => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeError;

    #[test]
    fn all_variants_roundtrip() {
        for &variant in ItemType::ALL {
            assert_eq!(ItemType::from_wire(variant.to_wire()).unwrap(), variant);
            assert_eq!(ItemType::from_name(variant.name()).unwrap(), variant);
        }
    }

    #[test]
    fn unknown_byte_rejected() {
        assert_eq!(
            ItemType::from_wire(0x0B),
            Err(TypeError::UnknownValue {
                enum_name: "ItemType",
                value: 0x0B
            })
        );
    }

    #[test]
    fn fixed_lengths() {
        assert_eq!(ItemType::Integer.fixed_len(), Some(4));
        assert_eq!(ItemType::Boolean.fixed_len(), Some(8));
        assert_eq!(ItemType::Structure.fixed_len(), None);
        assert_eq!(ItemType::BigInteger.fixed_len(), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ItemType::TextString.to_string(), "TextString");
    }
}
