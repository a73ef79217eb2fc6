use std::fmt;

/// A TTLV field tag.
///
/// Tags are 3-byte identifiers carried big-endian at the start of every
/// item header. Standard tags live in the `0x42xxxx` range and vendor
/// extensions in `0x54xxxx`; anything else is malformed on the wire.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────┐
/// │ Offset │ Size    │ Description                  │
/// ├────────┼─────────┼──────────────────────────────┤
/// │ 0x00   │ 3 bytes │ Tag (big-endian)             │
/// │ 0x03   │ 1 byte  │ Item type                    │
/// │ 0x04   │ 4 bytes │ Value length (big-endian)    │
/// └────────┴─────────┴──────────────────────────────┘
/// ```
///
/// `Tag::NONE` (zero) is never valid on the wire. Diagnostics use it to
/// mean "no field applies here".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u32);

/// First byte of standard protocol tags.
pub const STANDARD_PREFIX: u8 = 0x42;

/// First byte of vendor extension tags.
pub const EXTENSION_PREFIX: u8 = 0x54;

impl Tag {
    /// Sentinel meaning "not applicable".
    pub const NONE: Self = Self(0);

    /// Wrap a raw tag value. Only the low 24 bits are meaningful.
    pub const fn new(raw: u32) -> Self {
        Self(raw & 0x00FF_FFFF)
    }

    /// Get the underlying value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Whether this tag may appear on the wire.
    pub fn is_valid(self) -> bool {
        let [_, prefix, _, _] = self.0.to_be_bytes();
        prefix == STANDARD_PREFIX || prefix == EXTENSION_PREFIX
    }

    pub fn from_wire_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    pub fn to_wire_bytes(self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }

    /// The registered display name, if this tag is known.
    pub fn name(self) -> Option<&'static str> {
        REGISTRY
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, name)| *name)
    }

    /// Look a tag up by its registered display name.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(tag, _)| *tag)
    }
}

impl fmt::Display for Tag {
    /// Registered tags print their name, `NONE` prints `None`, and
    /// anything else prints as a 6-digit hex literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if self.is_none() => f.write_str("None"),
            None => write!(f, "{:#08X}", self.0),
        }
    }
}

impl From<u32> for Tag {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

// ── Registry ──────────────────────────────────────────────────────────
//
// Each entry defines an associated constant and its display name. The
// registry is a flat slice: it is small, and lookups only happen when a
// diagnostic is rendered.

macro_rules! tags {
    ( $( $konst:ident = $wire:literal => $name:literal ),+ $(,)? ) => {
        impl Tag {
            $( pub const $konst: Self = Self($wire); )+
        }

        const REGISTRY: &[(Tag, &str)] = &[ $( (Tag::$konst, $name) ),+ ];
    };
}

tags! {
    ACTIVATION_DATE = 0x42_0001 => "ActivationDate",
    ATTRIBUTE = 0x42_0008 => "Attribute",
    ATTRIBUTE_INDEX = 0x42_0009 => "AttributeIndex",
    ATTRIBUTE_NAME = 0x42_000A => "AttributeName",
    ATTRIBUTE_VALUE = 0x42_000B => "AttributeValue",
    AUTHENTICATION = 0x42_000C => "Authentication",
    BATCH_COUNT = 0x42_000D => "BatchCount",
    BATCH_ITEM = 0x42_000F => "BatchItem",
    BATCH_ORDER_OPTION = 0x42_0010 => "BatchOrderOption",
    CRYPTOGRAPHIC_ALGORITHM = 0x42_0028 => "CryptographicAlgorithm",
    CRYPTOGRAPHIC_LENGTH = 0x42_002A => "CryptographicLength",
    CRYPTOGRAPHIC_USAGE_MASK = 0x42_002C => "CryptographicUsageMask",
    KEY_BLOCK = 0x42_0040 => "KeyBlock",
    KEY_FORMAT_TYPE = 0x42_0042 => "KeyFormatType",
    KEY_MATERIAL = 0x42_0043 => "KeyMaterial",
    KEY_VALUE = 0x42_0045 => "KeyValue",
    MAXIMUM_RESPONSE_SIZE = 0x42_0050 => "MaximumResponseSize",
    NAME = 0x42_0053 => "Name",
    NAME_VALUE = 0x42_0055 => "NameValue",
    OBJECT_TYPE = 0x42_0057 => "ObjectType",
    OPERATION = 0x42_005C => "Operation",
    PROTOCOL_VERSION = 0x42_0069 => "ProtocolVersion",
    PROTOCOL_VERSION_MAJOR = 0x42_006A => "ProtocolVersionMajor",
    PROTOCOL_VERSION_MINOR = 0x42_006B => "ProtocolVersionMinor",
    REQUEST_HEADER = 0x42_0077 => "RequestHeader",
    REQUEST_MESSAGE = 0x42_0078 => "RequestMessage",
    REQUEST_PAYLOAD = 0x42_0079 => "RequestPayload",
    RESPONSE_HEADER = 0x42_007A => "ResponseHeader",
    RESPONSE_MESSAGE = 0x42_007B => "ResponseMessage",
    RESPONSE_PAYLOAD = 0x42_007C => "ResponsePayload",
    RESULT_MESSAGE = 0x42_007D => "ResultMessage",
    RESULT_REASON = 0x42_007E => "ResultReason",
    RESULT_STATUS = 0x42_007F => "ResultStatus",
    SYMMETRIC_KEY = 0x42_008F => "SymmetricKey",
    TEMPLATE_ATTRIBUTE = 0x42_0091 => "TemplateAttribute",
    TIME_STAMP = 0x42_0092 => "TimeStamp",
    UNIQUE_BATCH_ITEM_ID = 0x42_0093 => "UniqueBatchItemID",
    UNIQUE_IDENTIFIER = 0x42_0094 => "UniqueIdentifier",
}
