use crate::error::Error;

/// Root causes for codec failures.
///
/// These are the codec's failure vocabulary. Each variant is a fixed,
/// comparable value: callers distinguish failure kinds with
/// [`Error::is`], and everything that varies per failure (which field,
/// which type, where in the message) travels as context on the wrapping
/// layers, never inside the sentinel.
///
/// ```text
/// ┌──────────────────────┬────────────────────────────────────────────────┐
/// │ Variant              │ Raised when                                    │
/// ├──────────────────────┼────────────────────────────────────────────────┤
/// │ HeaderTruncated      │ fewer than 8 bytes remain for an item header   │
/// │ ValueTruncated       │ the declared value runs past the buffer        │
/// │ InvalidTag           │ tag outside the standard/extension ranges      │
/// │ TagConflict          │ a tag that must be unique appears twice        │
/// │ InvalidType          │ unknown type byte, or wire/target mismatch     │
/// │ InvalidLen           │ length disagrees with type or buffer           │
/// │ NoTag                │ a required tag is absent                       │
/// │ IntOverflow          │ value does not fit a 32-bit Integer            │
/// │ LongIntOverflow      │ value does not fit a 64-bit LongInteger        │
/// │ UnsupportedType      │ target cannot represent the wire type          │
/// │ UnsupportedEnumType  │ enum target fed a non-enum, non-int value      │
/// │ InvalidHexString     │ malformed hex input                            │
/// └──────────────────────┴────────────────────────────────────────────────┘
/// ```
///
/// `TagConflict` has an empty message on purpose: the conflicting tag
/// and path are always supplied by the context, so repeating them here
/// would only duplicate the diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CodecError {
    #[error("header truncated")]
    HeaderTruncated,

    #[error("value truncated")]
    ValueTruncated,

    #[error("invalid tag")]
    InvalidTag,

    #[error("")]
    TagConflict,

    #[error("invalid type")]
    InvalidType,

    #[error("invalid length")]
    InvalidLen,

    #[error("no tag")]
    NoTag,

    #[error("value exceeds max int value {max}", max = i32::MAX)]
    IntOverflow,

    #[error("value exceeds max long int value {max}", max = i64::MAX)]
    LongIntOverflow,

    #[error("unsupported type")]
    UnsupportedType,

    #[error("unsupported type for enums, must be string or integer types")]
    UnsupportedEnumType,

    #[error("invalid hex string")]
    InvalidHexString,
}

impl CodecError {
    /// The full catalog, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::HeaderTruncated,
        Self::ValueTruncated,
        Self::InvalidTag,
        Self::TagConflict,
        Self::InvalidType,
        Self::InvalidLen,
        Self::NoTag,
        Self::IntOverflow,
        Self::LongIntOverflow,
        Self::UnsupportedType,
        Self::UnsupportedEnumType,
        Self::InvalidHexString,
    ];
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Error::new(err)
    }
}
