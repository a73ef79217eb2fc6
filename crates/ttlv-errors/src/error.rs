use std::any::{Any, TypeId, type_name};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::trace::Trace;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A typed key into an error's attribute store.
///
/// Keys are types, not strings: two keys collide only if they are the
/// same type, so a private key type can never be read or overwritten by
/// code outside the module that declares it.
///
/// ```
/// use ttlv_errors::{AttributeKey, CodecError, Error};
///
/// struct RequestId;
///
/// impl AttributeKey for RequestId {
///     type Value = u64;
/// }
///
/// let err = Error::from(CodecError::InvalidLen).with_attribute::<RequestId>(7);
/// assert_eq!(err.attribute::<RequestId>(), Some(&7));
/// ```
pub trait AttributeKey: 'static {
    type Value: Any + Send + Sync;
}

/// An annotated codec error.
///
/// An `Error` is a chain of immutable layers ending at a single root
/// cause. Every annotation (attribute, message, trace) adds a new layer
/// over the previous value instead of mutating it, so clones handed to
/// other threads never observe later annotations.
///
/// ```text
///   outermost ──► [ctx: Path=KeyBlock]
///                 [trace, ctx: Tag=KeyValue, msg="KeyValue: invalid length"]
///   root      ──► CodecError::InvalidLen
/// ```
///
/// Lookups walk from the outermost layer inward and return the first
/// hit, so the most recent annotation wins while older ones stay
/// reachable through [`Error::attributes`].
#[derive(Clone)]
pub struct Error {
    layer: Arc<Layer>,
}

pub(crate) struct Layer {
    source: Source,
    attributes: Vec<Attribute>,
    pub(crate) message: Option<String>,
    pub(crate) user_message: Option<String>,
    pub(crate) trace: Option<Trace>,
}

enum Source {
    Root(BoxError),
    Wrapped(Error),
}

struct Attribute {
    key: TypeId,
    key_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl Attribute {
    fn new<K: AttributeKey>(value: K::Value) -> Self {
        Self {
            key: TypeId::of::<K>(),
            key_name: type_name::<K>(),
            value: Box::new(value),
        }
    }

    /// # Panics
    ///
    /// Panics if the stored value is not `K::Value`. Attributes are only
    /// ever inserted through `Attribute::new::<K>`, so a mismatch means
    /// the store itself is corrupt.
    fn value<K: AttributeKey>(&self) -> &K::Value {
        match self.value.downcast_ref::<K::Value>() {
            Some(value) => value,
            None => panic!(
                "error attribute {} holds a value of the wrong type, expected {}",
                self.key_name,
                type_name::<K::Value>()
            ),
        }
    }
}

impl Layer {
    fn over(cause: Error) -> Self {
        Self {
            source: Source::Wrapped(cause),
            attributes: Vec::new(),
            message: None,
            user_message: None,
            trace: None,
        }
    }

    fn root(cause: BoxError) -> Self {
        Self {
            source: Source::Root(cause),
            attributes: Vec::new(),
            message: None,
            user_message: None,
            trace: None,
        }
    }

    /// Set `K` on this layer, replacing any earlier value for `K` here.
    pub(crate) fn set_attribute<K: AttributeKey>(&mut self, value: K::Value) {
        self.attributes.retain(|a| a.key != TypeId::of::<K>());
        self.attributes.push(Attribute::new::<K>(value));
    }

    fn seal(self) -> Error {
        Error {
            layer: Arc::new(self),
        }
    }
}

impl Error {
    /// Root a new chain at `cause`.
    ///
    /// No trace is captured. Passing an `Error` returns it unchanged
    /// rather than nesting one chain inside another.
    pub fn new<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: BoxError = Box::new(cause);
        match boxed.downcast::<Error>() {
            Ok(existing) => *existing,
            Err(root) => Layer::root(root).seal(),
        }
    }

    /// Wrap `cause` and capture a trace at the caller.
    #[track_caller]
    pub fn wrap(cause: impl Into<Error>) -> Self {
        Self::wrap_skipping(cause, 0)
    }

    /// Wrap `cause` and capture a trace, hiding `skip` further frames.
    ///
    /// Frames inside this crate are always hidden. `skip` lets a helper
    /// that wraps on behalf of its caller hide its own frames too; the
    /// recorded location follows `#[track_caller]` and so already points
    /// past any helper that carries the attribute.
    #[track_caller]
    pub fn wrap_skipping(cause: impl Into<Error>, skip: usize) -> Self {
        let trace = Trace::capture(Location::caller(), skip);
        cause.into().push_layer(|layer| layer.trace = Some(trace))
    }

    /// Add a layer built by `build` over this error.
    pub(crate) fn push_layer(self, build: impl FnOnce(&mut Layer)) -> Self {
        let mut layer = Layer::over(self);
        build(&mut layer);
        layer.seal()
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> {
        std::iter::successors(Some(&*self.layer), |&layer| match &layer.source {
            Source::Wrapped(inner) => Some(&*inner.layer),
            Source::Root(_) => None,
        })
    }

    /// The original cause at the bottom of the chain.
    pub fn root(&self) -> &(dyn StdError + Send + Sync + 'static) {
        let mut layer: &Layer = &self.layer;
        loop {
            match &layer.source {
                Source::Wrapped(inner) => layer = &*inner.layer,
                Source::Root(root) => return root.as_ref(),
            }
        }
    }

    /// Whether the root cause equals any of `originals`.
    ///
    /// Matching is by the root's concrete type and `PartialEq`, never by
    /// message text, and sees through any number of wraps.
    pub fn is<E>(&self, originals: &[E]) -> bool
    where
        E: StdError + PartialEq + 'static,
    {
        self.root()
            .downcast_ref::<E>()
            .is_some_and(|root| originals.contains(root))
    }

    /// Number of layers above the root.
    pub fn depth(&self) -> usize {
        self.layers().count() - 1
    }

    /// A new layer storing `value` under `K`; clones of the receiver are unaffected.
    pub fn with_attribute<K: AttributeKey>(self, value: K::Value) -> Self {
        self.push_layer(|layer| layer.set_attribute::<K>(value))
    }

    /// The outermost value stored under `K`.
    ///
    /// # Panics
    ///
    /// Panics if the store holds a value of the wrong type for `K`. That
    /// can only happen through a bug in this crate.
    pub fn attribute<K: AttributeKey>(&self) -> Option<&K::Value> {
        self.attributes::<K>().next()
    }

    /// Every value stored under `K`, outermost first.
    pub fn attributes<K: AttributeKey>(&self) -> impl Iterator<Item = &K::Value> {
        self.layers()
            .flat_map(|layer| layer.attributes.iter())
            .filter(|attr| attr.key == TypeId::of::<K>())
            .map(Attribute::value::<K>)
    }

    /// The developer message.
    ///
    /// This is the outermost message set by a wrap, or the root cause's
    /// own `Display` output when no wrap set one.
    pub fn message(&self) -> Cow<'_, str> {
        match self.layers().find_map(|layer| layer.message.as_deref()) {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(self.root().to_string()),
        }
    }

    /// The end-user message, or `""` if no wrap set one.
    pub fn user_message(&self) -> &str {
        self.layers()
            .find_map(|layer| layer.user_message.as_deref())
            .unwrap_or_default()
    }

    /// A new layer replacing the developer message; clones of the receiver are unaffected.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.push_layer(|layer| layer.message = Some(message))
    }

    /// A new layer setting the end-user message; clones of the receiver are unaffected.
    pub fn with_user_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.push_layer(|layer| layer.user_message = Some(message))
    }

    /// Prefix the developer message: `"<text>: <message>"`.
    ///
    /// An empty message (for example [`CodecError::TagConflict`]'s) yields
    /// just `text`, without a dangling separator.
    ///
    /// [`CodecError::TagConflict`]: crate::CodecError::TagConflict
    pub fn prepend(self, text: impl fmt::Display) -> Self {
        let message = prefixed(&text, &self.message());
        self.push_layer(|layer| layer.message = Some(message))
    }

    /// The trace captured by the outermost layer that captured one,
    /// rendered on demand. Empty if nothing in the chain captured.
    pub fn stacktrace(&self) -> String {
        self.layers()
            .find_map(|layer| layer.trace.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Where the outermost trace was captured.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.layers()
            .find_map(|layer| layer.trace.as_ref())
            .map(Trace::location)
    }
}

pub(crate) fn prefixed(text: &dyn fmt::Display, message: &str) -> String {
    if message.is_empty() {
        text.to_string()
    } else {
        format!("{text}: {message}")
    }
}

/// Whether `err`'s root cause equals any of `originals`.
///
/// `None` never matches: there is no "no error" value to compare with.
pub fn is<E>(err: Option<&Error>, originals: &[E]) -> bool
where
    E: StdError + PartialEq + 'static,
{
    err.is_some_and(|err| err.is(originals))
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl fmt::Debug for Error {
    /// Debug output is the full diagnostic, so `unwrap()` failures and
    /// `{:?}` logging show context and trace without extra plumbing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details())
    }
}

impl StdError for Error {
    /// The chain renders as one logical error whose message already
    /// includes the root's text, so `source` continues from the root's
    /// own source rather than repeating it.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.root().source()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(err)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::new(err)
    }
}

#[cfg(test)]
impl Error {
    /// Store `value` under `K`'s key without type checking, to simulate a
    /// corrupted store.
    pub(crate) fn with_forged_attribute<K: AttributeKey>(
        self,
        value: impl Any + Send + Sync,
    ) -> Self {
        self.push_layer(|layer| {
            layer.attributes.push(Attribute {
                key: TypeId::of::<K>(),
                key_name: type_name::<K>(),
                value: Box::new(value),
            });
        })
    }
}
