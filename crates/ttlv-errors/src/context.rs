use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use ttlv_types::{ItemType, ResultReason, Tag};

use crate::details::append_field;
use crate::error::{AttributeKey, Error};

/// Coarse category of a described type, shown as `Kind:` in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    Str,
    Slice,
    Array,
    Map,
    Option,
    Struct,
    Enum,
    Unit,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Char => "char",
            Self::Str => "string",
            Self::Slice => "slice",
            Self::Array => "array",
            Self::Map => "map",
            Self::Option => "option",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Unit => "unit",
        })
    }
}

/// The type of a value, without the value.
///
/// Diagnostics record what was being processed, never its contents:
/// payloads can be large, and key material must not end up in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    type_name: &'static str,
    kind: Kind,
}

impl TypeDescriptor {
    /// Describe `T` without needing an instance.
    pub fn of<T: Describe + ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
            kind: T::KIND,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// Types that can appear as the value in an [`ErrorContext`].
///
/// Implementors only pick a [`Kind`]; the type name comes from
/// [`std::any::type_name`].
pub trait Describe {
    const KIND: Kind;

    /// `None` means there is no value to describe.
    fn describe(&self) -> Option<TypeDescriptor> {
        Some(TypeDescriptor::of::<Self>())
    }
}

macro_rules! describe {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $( impl Describe for $ty { const KIND: Kind = Kind::$kind; } )+
    };
}

describe!(Bool => bool);
describe!(Int => i8, i16, i32, i64, i128, isize);
describe!(Uint => u8, u16, u32, u64, u128, usize);
describe!(Float => f32, f64);
describe!(Char => char);
describe!(Str => str, String);
describe!(Struct => Tag);
describe!(Enum => ItemType, ResultReason);

impl<T> Describe for [T] {
    const KIND: Kind = Kind::Slice;
}

impl<T> Describe for Vec<T> {
    const KIND: Kind = Kind::Slice;
}

impl<T, const N: usize> Describe for [T; N] {
    const KIND: Kind = Kind::Array;
}

impl<T> Describe for Option<T> {
    const KIND: Kind = Kind::Option;
}

impl<K, V, S> Describe for HashMap<K, V, S> {
    const KIND: Kind = Kind::Map;
}

impl<K, V> Describe for BTreeMap<K, V> {
    const KIND: Kind = Kind::Map;
}

impl<T: Describe + ?Sized> Describe for &T {
    const KIND: Kind = T::KIND;

    fn describe(&self) -> Option<TypeDescriptor> {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    const KIND: Kind = T::KIND;

    fn describe(&self) -> Option<TypeDescriptor> {
        (**self).describe()
    }
}

/// No value.
impl Describe for () {
    const KIND: Kind = Kind::Unit;

    fn describe(&self) -> Option<TypeDescriptor> {
        None
    }
}

/// A descriptor stands for its type: it is reported as-is rather than
/// as `TypeDescriptor`.
impl Describe for TypeDescriptor {
    const KIND: Kind = Kind::Struct;

    fn describe(&self) -> Option<TypeDescriptor> {
        Some(*self)
    }
}

/// Where in a structural traversal a failure happened.
///
/// `tag` is the field being processed (`Tag::NONE` when no field
/// applies), `value` the type of the value in hand, and `path` the names
/// of the enclosing structures from outermost to innermost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub tag: Tag,
    pub value: Option<TypeDescriptor>,
    pub path: Vec<String>,
}

impl ErrorContext {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn with_value<V: Describe + ?Sized>(mut self, value: &V) -> Self {
        self.value = value.describe();
        self
    }

    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Render the non-empty sections, one per line:
    ///
    /// ```text
    /// Tag: KeyValue
    /// Type: ttlv_wire::value::Value
    /// Kind: enum
    /// Path: KeyBlock.KeyValue
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.tag.is_none() {
            append_field(&mut out, "Tag", &self.tag.to_string());
        }
        if let Some(value) = &self.value {
            append_field(&mut out, "Type", value.type_name());
            append_field(&mut out, "Kind", &value.kind().to_string());
        }
        append_field(&mut out, "Path", &self.path.join("."));
        out
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub(crate) struct ContextKey;

impl AttributeKey for ContextKey {
    type Value = ErrorContext;
}

impl Error {
    /// A new layer carrying `ctx`; clones of the receiver are unaffected.
    pub fn with_error_context(self, ctx: ErrorContext) -> Self {
        self.with_attribute::<ContextKey>(ctx)
    }

    /// The outermost context.
    pub fn error_context(&self) -> Option<&ErrorContext> {
        self.attribute::<ContextKey>()
    }

    /// Every context in the chain, outermost first.
    pub fn error_contexts(&self) -> impl Iterator<Item = &ErrorContext> {
        self.attributes::<ContextKey>()
    }

    /// Prepend `segment` to the outermost context's path.
    ///
    /// Called once per enclosing structure while a failure unwinds, so
    /// the outermost context ends up holding the full breadcrumb. The
    /// inner contexts are left untouched.
    pub fn push_path(self, segment: impl fmt::Display) -> Self {
        let mut ctx = self.error_context().cloned().unwrap_or_default();
        ctx.path.insert(0, segment.to_string());
        self.with_error_context(ctx)
    }
}

pub fn with_error_context(err: impl Into<Error>, ctx: ErrorContext) -> Error {
    err.into().with_error_context(ctx)
}

/// The outermost context of `err`, or `None` when there is no error or
/// no context.
pub fn get_error_context(err: Option<&Error>) -> Option<&ErrorContext> {
    err.and_then(Error::error_context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn empty_context_renders_empty() {
        assert_eq!(ErrorContext::default().render(), "");
    }

    #[test]
    fn tag_and_path_without_value() {
        let ctx = ErrorContext::new(Tag::KEY_BLOCK).with_path(["a", "b"]);
        insta::assert_snapshot!(ctx.render(), @r"
        Tag: KeyBlock
        Path: a.b
        ");
    }

    #[test]
    fn value_renders_type_and_kind() {
        let ctx = ErrorContext::new(Tag::NONE).with_value(&42_i32);
        insta::assert_snapshot!(ctx.render(), @r"
        Type: i32
        Kind: int
        ");
    }

    #[test]
    fn descriptor_is_used_directly() {
        let ctx = ErrorContext::default().with_value(&TypeDescriptor::of::<Vec<u8>>());
        assert_eq!(
            ctx.value,
            Some(TypeDescriptor {
                type_name: type_name::<Vec<u8>>(),
                kind: Kind::Slice
            })
        );
    }

    #[test]
    fn unit_means_no_value() {
        let ctx = ErrorContext::new(Tag::KEY_VALUE).with_value(&());
        assert_eq!(ctx.value, None);
        assert_eq!(ctx.render(), "Tag: KeyValue");
    }

    #[test]
    fn references_describe_their_target() {
        let text = String::from("abc");
        let by_ref: &String = &text;
        assert_eq!(by_ref.describe(), Some(TypeDescriptor::of::<String>()));
        assert_eq!("abc".describe().map(|d| d.kind()), Some(Kind::Str));
    }

    #[test]
    fn roundtrip_through_error() {
        let ctx = ErrorContext::new(Tag::OPERATION)
            .with_value(&7_u32)
            .with_path(["RequestMessage", "BatchItem"]);
        let err = with_error_context(CodecError::InvalidType, ctx.clone());
        assert_eq!(get_error_context(Some(&err)), Some(&ctx));
        assert_eq!(get_error_context(None), None);
    }

    #[test]
    fn outermost_context_wins() {
        let err = Error::from(CodecError::InvalidLen)
            .with_error_context(ErrorContext::new(Tag::KEY_VALUE))
            .with_error_context(ErrorContext::new(Tag::KEY_BLOCK));
        assert_eq!(err.error_context().map(|c| c.tag), Some(Tag::KEY_BLOCK));
        assert_eq!(
            err.error_contexts().map(|c| c.tag).collect::<Vec<_>>(),
            vec![Tag::KEY_BLOCK, Tag::KEY_VALUE]
        );
    }

    #[test]
    fn push_path_builds_breadcrumb() {
        let err = Error::from(CodecError::InvalidLen)
            .with_error_context(ErrorContext::new(Tag::KEY_MATERIAL))
            .push_path(Tag::KEY_VALUE)
            .push_path(Tag::KEY_BLOCK);

        let ctx = err.error_context().unwrap();
        assert_eq!(ctx.tag, Tag::KEY_MATERIAL);
        assert_eq!(ctx.path, vec!["KeyBlock", "KeyValue"]);
        // the innermost context keeps its empty path
        assert!(err.error_contexts().last().unwrap().path.is_empty());
    }

    #[test]
    fn push_path_without_context() {
        let err = Error::from(CodecError::InvalidLen).push_path("Root");
        let ctx = err.error_context().unwrap();
        assert_eq!(ctx.tag, Tag::NONE);
        assert_eq!(ctx.path, vec!["Root"]);
    }
}
