use ttlv_errors::{CodecError, Describe, Error, Kind, ResultExt, ResultReason, Tag, tag_error};
use ttlv_types::ItemType;

/// A decoded TTLV value.
///
/// One variant per [`ItemType`]. Big integers keep their raw two's
/// complement bytes; conversion to a machine integer happens only on
/// request through [`FromValue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Structure(Vec<Item>),
    Integer(i32),
    LongInteger(i64),
    BigInteger(Vec<u8>),
    Enumeration(u32),
    Boolean(bool),
    TextString(String),
    ByteString(Vec<u8>),
    DateTime(i64),
    Interval(u32),
}

impl Value {
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Structure(_) => ItemType::Structure,
            Self::Integer(_) => ItemType::Integer,
            Self::LongInteger(_) => ItemType::LongInteger,
            Self::BigInteger(_) => ItemType::BigInteger,
            Self::Enumeration(_) => ItemType::Enumeration,
            Self::Boolean(_) => ItemType::Boolean,
            Self::TextString(_) => ItemType::TextString,
            Self::ByteString(_) => ItemType::ByteString,
            Self::DateTime(_) => ItemType::DateTime,
            Self::Interval(_) => ItemType::Interval,
        }
    }
}

impl Describe for Value {
    const KIND: Kind = Kind::Enum;
}

/// A tagged value: one node of a TTLV tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub tag: Tag,
    pub value: Value,
}

impl Describe for Item {
    const KIND: Kind = Kind::Struct;
}

impl Item {
    pub fn new(tag: Tag, value: Value) -> Self {
        Self { tag, value }
    }

    pub fn structure(tag: Tag, children: Vec<Item>) -> Self {
        Self::new(tag, Value::Structure(children))
    }

    /// An `Integer` item from a wider value.
    ///
    /// # Errors
    ///
    /// [`CodecError::IntOverflow`] if `value` does not fit in 32 bits.
    #[track_caller]
    pub fn integer(tag: Tag, value: i64) -> Result<Self, Error> {
        let narrow = i32::try_from(value)
            .map_err(|_| CodecError::IntOverflow)
            .tag_err(tag, &value)?;
        Ok(Self::new(tag, Value::Integer(narrow)))
    }

    /// A `LongInteger` item from an unsigned value.
    ///
    /// # Errors
    ///
    /// [`CodecError::LongIntOverflow`] if `value` exceeds `i64::MAX`.
    #[track_caller]
    pub fn long_integer(tag: Tag, value: u64) -> Result<Self, Error> {
        let signed = i64::try_from(value)
            .map_err(|_| CodecError::LongIntOverflow)
            .tag_err(tag, &value)?;
        Ok(Self::new(tag, Value::LongInteger(signed)))
    }

    /// Child items, or an empty slice for non-structures.
    pub fn children(&self) -> &[Item] {
        match &self.value {
            Value::Structure(children) => children,
            _ => &[],
        }
    }

    /// The first child with `tag`.
    pub fn child(&self, tag: Tag) -> Option<&Item> {
        self.children().iter().find(|child| child.tag == tag)
    }

    /// The child with `tag`, which must be present.
    ///
    /// # Errors
    ///
    /// [`CodecError::NoTag`] if no child carries `tag`.
    #[track_caller]
    pub fn required_child(&self, tag: Tag) -> Result<&Item, Error> {
        match self.child(tag) {
            Some(child) => Ok(child),
            None => Err(tag_error(CodecError::NoTag, tag, &())
                .push_path(self.tag)
                .with_result_reason(ResultReason::MissingData)),
        }
    }

    /// The child with `tag`, which may appear at most once.
    ///
    /// # Errors
    ///
    /// [`CodecError::TagConflict`] if more than one child carries `tag`.
    #[track_caller]
    pub fn unique_child(&self, tag: Tag) -> Result<Option<&Item>, Error> {
        let mut matches = self.children().iter().filter(|child| child.tag == tag);
        let first = matches.next();
        match matches.next() {
            None => Ok(first),
            Some(dup) => Err(tag_error(CodecError::TagConflict, tag, dup)
                .push_path(self.tag)
                .with_result_reason(ResultReason::InvalidField)),
        }
    }

    /// Extract this item's value as `T`.
    ///
    /// # Errors
    ///
    /// Whatever [`FromValue`] reports for `T`, tagged with this item's
    /// tag and value type.
    #[track_caller]
    pub fn get<T: FromValue>(&self) -> Result<T, Error> {
        T::from_value(&self.value)
            .tag_err(self.tag, &self.value)
            .with_result_reason(ResultReason::InvalidField)
    }
}

/// Typed extraction from a [`Value`].
///
/// Implementations report plain sentinels; [`Item::get`] adds the tag
/// and context.
///
/// ```text
/// ┌──────────────────────────────┬────────────────────────────┐
/// │ Situation                    │ Sentinel                   │
/// ├──────────────────────────────┼────────────────────────────┤
/// │ Structure into a scalar      │ UnsupportedType            │
/// │ Other wire type mismatch     │ InvalidType                │
/// │ Enum from bool/bytes/struct… │ UnsupportedEnumType        │
/// │ Unknown enum code or name    │ InvalidType                │
/// │ Narrowing loses bits         │ IntOverflow / LongInt…     │
/// └──────────────────────────────┴────────────────────────────┘
/// ```
pub trait FromValue: Sized {
    /// # Errors
    ///
    /// A [`CodecError`] describing why `value` cannot become `Self`.
    fn from_value(value: &Value) -> Result<Self, CodecError>;
}

fn mismatch(value: &Value) -> CodecError {
    match value {
        Value::Structure(_) => CodecError::UnsupportedType,
        _ => CodecError::InvalidType,
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match *value {
            Value::Integer(v) => Ok(v),
            Value::LongInteger(v) => i32::try_from(v).map_err(|_| CodecError::IntOverflow),
            Value::Enumeration(v) | Value::Interval(v) => {
                i32::try_from(v).map_err(|_| CodecError::IntOverflow)
            }
            _ => Err(mismatch(value)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Integer(v) => Ok(i64::from(*v)),
            Value::LongInteger(v) | Value::DateTime(v) => Ok(*v),
            Value::Enumeration(v) | Value::Interval(v) => Ok(i64::from(*v)),
            Value::BigInteger(bytes) => big_to_i64(bytes),
            _ => Err(mismatch(value)),
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match *value {
            Value::Enumeration(v) | Value::Interval(v) => Ok(v),
            Value::Integer(v) => u32::try_from(v).map_err(|_| CodecError::IntOverflow),
            _ => Err(mismatch(value)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match *value {
            Value::Boolean(v) => Ok(v),
            _ => Err(mismatch(value)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::TextString(v) => Ok(v.clone()),
            _ => Err(mismatch(value)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::ByteString(v) | Value::BigInteger(v) => Ok(v.clone()),
            _ => Err(mismatch(value)),
        }
    }
}

impl FromValue for Vec<Item> {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Structure(children) => Ok(children.clone()),
            _ => Err(CodecError::InvalidType),
        }
    }
}

// ── Enumerations ──────────────────────────────────────────────────────
//
// Enum targets accept an Enumeration code, a non-negative Integer code,
// or a TextString holding the variant's display name. Anything else is
// the wrong backing type for an enum, which is its own failure kind.

macro_rules! enum_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, CodecError> {
                    match value {
                        Value::Enumeration(code) => {
                            let code = (*code).try_into().map_err(|_| CodecError::InvalidType)?;
                            <$ty>::from_wire(code).map_err(|_| CodecError::InvalidType)
                        }
                        Value::Integer(code) => {
                            let code = (*code).try_into().map_err(|_| CodecError::InvalidType)?;
                            <$ty>::from_wire(code).map_err(|_| CodecError::InvalidType)
                        }
                        Value::TextString(name) => {
                            <$ty>::from_name(name).map_err(|_| CodecError::InvalidType)
                        }
                        _ => Err(CodecError::UnsupportedEnumType),
                    }
                }
            }
        )+
    };
}

enum_from_value!(ResultReason, ItemType);

/// Narrow a big-endian two's complement integer to `i64`.
fn big_to_i64(bytes: &[u8]) -> Result<i64, CodecError> {
    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let fill = if negative { 0xFF } else { 0x00 };

    let (head, tail) = bytes.split_at(bytes.len().saturating_sub(8));
    if head.iter().any(|&b| b != fill) {
        return Err(CodecError::LongIntOverflow);
    }

    let mut buf = [fill; 8];
    buf[8 - tail.len()..].copy_from_slice(tail);
    let value = i64::from_be_bytes(buf);

    // the sign must survive dropping the high bytes
    if (value < 0) != negative {
        return Err(CodecError::LongIntOverflow);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_overflow_is_tagged() {
        let err = Item::integer(Tag::BATCH_COUNT, i64::from(i32::MAX) + 1).unwrap_err();
        assert!(err.is(&[CodecError::IntOverflow]));
        assert!(err.message().starts_with("BatchCount: value exceeds max int value"));
        let ctx = err.error_context().unwrap();
        assert_eq!(ctx.value.unwrap().type_name(), "i64");
    }

    #[test]
    fn integer_in_range() {
        let item = Item::integer(Tag::BATCH_COUNT, -5).unwrap();
        assert_eq!(item.value, Value::Integer(-5));
    }

    #[test]
    fn long_integer_overflow() {
        let err = Item::long_integer(Tag::MAXIMUM_RESPONSE_SIZE, u64::MAX).unwrap_err();
        assert!(err.is(&[CodecError::LongIntOverflow]));
        assert!(err.message().contains("9223372036854775807"));
    }

    #[test]
    fn required_child_missing() {
        let item = Item::structure(Tag::KEY_BLOCK, vec![]);
        let err = item.required_child(Tag::KEY_VALUE).unwrap_err();
        assert!(err.is(&[CodecError::NoTag]));
        assert_eq!(err.message(), "KeyValue: no tag");
        assert_eq!(err.result_reason(), ResultReason::MissingData);
        assert_eq!(err.error_context().unwrap().path, vec!["KeyBlock"]);
    }

    #[test]
    fn unique_child_conflict() {
        let name = Item::new(Tag::NAME_VALUE, Value::TextString("a".into()));
        let item = Item::structure(Tag::NAME, vec![name.clone(), name]);
        let err = item.unique_child(Tag::NAME_VALUE).unwrap_err();
        assert!(err.is(&[CodecError::TagConflict]));
        assert_eq!(err.message(), "NameValue");

        let single = Item::structure(Tag::NAME, vec![]);
        assert_eq!(single.unique_child(Tag::NAME_VALUE).unwrap(), None);
    }

    #[test]
    fn get_mismatches() {
        let text = Item::new(Tag::NAME_VALUE, Value::TextString("x".into()));
        let err = text.get::<i32>().unwrap_err();
        assert!(err.is(&[CodecError::InvalidType]));
        assert_eq!(err.result_reason(), ResultReason::InvalidField);

        let structure = Item::structure(Tag::KEY_BLOCK, vec![]);
        let err = structure.get::<bool>().unwrap_err();
        assert!(err.is(&[CodecError::UnsupportedType]));
    }

    #[test]
    fn get_narrowing() {
        let long = Item::new(Tag::BATCH_COUNT, Value::LongInteger(i64::MAX));
        assert!(long.get::<i32>().unwrap_err().is(&[CodecError::IntOverflow]));
        assert_eq!(long.get::<i64>().unwrap(), i64::MAX);
    }

    #[test]
    fn enum_targets() {
        let coded = Item::new(Tag::RESULT_REASON, Value::Enumeration(0x0004));
        assert_eq!(coded.get::<ResultReason>().unwrap(), ResultReason::InvalidMessage);

        let named = Item::new(Tag::RESULT_REASON, Value::TextString("ItemNotFound".into()));
        assert_eq!(named.get::<ResultReason>().unwrap(), ResultReason::ItemNotFound);

        let unknown = Item::new(Tag::RESULT_REASON, Value::Enumeration(0x9999));
        assert!(unknown.get::<ResultReason>().unwrap_err().is(&[CodecError::InvalidType]));

        let wrong = Item::new(Tag::RESULT_REASON, Value::Boolean(true));
        assert!(
            wrong
                .get::<ResultReason>()
                .unwrap_err()
                .is(&[CodecError::UnsupportedEnumType])
        );

        let item_type = Item::new(Tag::ATTRIBUTE_VALUE, Value::Integer(7));
        assert_eq!(item_type.get::<ItemType>().unwrap(), ItemType::TextString);
    }

    #[test]
    fn big_integer_narrowing() {
        assert_eq!(big_to_i64(&[0, 0, 0, 0, 0, 0, 0, 42]), Ok(42));
        assert_eq!(big_to_i64(&[0xFF; 8]), Ok(-1));
        assert_eq!(big_to_i64(&[0xFF; 16]), Ok(-1));
        assert_eq!(big_to_i64(&[]), Ok(0));

        let mut too_big = vec![0u8; 16];
        too_big[7] = 1;
        assert_eq!(big_to_i64(&too_big), Err(CodecError::LongIntOverflow));

        // positive value whose low 8 bytes look negative
        let mut sign_flip = vec![0u8; 16];
        sign_flip[8] = 0x80;
        assert_eq!(big_to_i64(&sign_flip), Err(CodecError::LongIntOverflow));
    }

    #[test]
    fn children_of_scalar_is_empty() {
        let item = Item::new(Tag::BATCH_COUNT, Value::Integer(1));
        assert!(item.children().is_empty());
        assert!(item.child(Tag::KEY_VALUE).is_none());
    }
}
