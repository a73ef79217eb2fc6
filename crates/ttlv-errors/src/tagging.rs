use std::fmt;
use std::panic::Location;

use ttlv_types::{ResultReason, Tag};

use crate::context::{ContextKey, Describe, ErrorContext};
use crate::error::{Error, prefixed};
use crate::trace::Trace;

/// Annotate a codec failure with the field it happened on.
///
/// In one new layer this captures a trace at the caller, attaches an
/// [`ErrorContext`] holding `tag` and the type of `value`, and, unless
/// `tag` is [`Tag::NONE`], prefixes the message with the tag's name so it
/// reads `"KeyValue: invalid length"`. Pass `&()` when there is no value.
///
/// Tagging an already tagged error is fine: the new context sits on top
/// and the earlier one stays reachable via [`Error::error_contexts`].
#[track_caller]
pub fn tag_error<V>(err: impl Into<Error>, tag: Tag, value: &V) -> Error
where
    V: Describe + ?Sized,
{
    tag_error_skipping(err, tag, value, 0)
}

/// [`tag_error`], hiding `skip` extra frames from the rendered backtrace.
///
/// For helpers built on top of tagging that should not show up in the
/// trace themselves.
#[track_caller]
pub fn tag_error_skipping<V>(err: impl Into<Error>, tag: Tag, value: &V, skip: usize) -> Error
where
    V: Describe + ?Sized,
{
    let trace = Trace::capture(Location::caller(), skip);
    let err = err.into();
    let message = (!tag.is_none()).then(|| prefixed(&tag, &err.message()));
    let ctx = ErrorContext::new(tag).with_value(value);

    err.push_layer(|layer| {
        layer.trace = Some(trace);
        layer.set_attribute::<ContextKey>(ctx);
        layer.message = message;
    })
}

/// Annotation helpers on `Result`, so `Ok` values pass through untouched
/// and nothing is formatted unless there is an error.
///
/// ```
/// use ttlv_errors::{CodecError, ResultExt, Tag};
///
/// fn read_len(buf: &[u8]) -> Result<u32, CodecError> {
///     buf.get(..4)
///         .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
///         .ok_or(CodecError::HeaderTruncated)
/// }
///
/// let err = read_len(&[0, 1]).tag_err(Tag::KEY_VALUE, &()).unwrap_err();
/// assert_eq!(err.message(), "KeyValue: header truncated");
/// ```
pub trait ResultExt<T> {
    /// [`tag_error`] on the error, if any.
    fn tag_err<V>(self, tag: Tag, value: &V) -> Result<T, Error>
    where
        V: Describe + ?Sized;

    /// [`Error::push_path`] on the error, if any.
    fn push_path(self, segment: impl fmt::Display) -> Result<T, Error>;

    /// [`Error::with_result_reason`] on the error, if any.
    fn with_result_reason(self, reason: ResultReason) -> Result<T, Error>;
}

impl<T, E: Into<Error>> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn tag_err<V>(self, tag: Tag, value: &V) -> Result<T, Error>
    where
        V: Describe + ?Sized,
    {
        match self {
            Ok(v) => Ok(v),
            Err(err) => Err(tag_error_skipping(err, tag, value, 0)),
        }
    }

    fn push_path(self, segment: impl fmt::Display) -> Result<T, Error> {
        self.map_err(|err| err.into().push_path(segment))
    }

    fn with_result_reason(self, reason: ResultReason) -> Result<T, Error> {
        self.map_err(|err| err.into().with_result_reason(reason))
    }
}
