use ttlv_types::ResultReason;

use crate::error::{AttributeKey, Error};

struct ReasonKey;

impl AttributeKey for ReasonKey {
    type Value = ResultReason;
}

impl Error {
    /// A new layer carrying `reason`; clones of the receiver are unaffected.
    pub fn with_result_reason(self, reason: ResultReason) -> Self {
        self.with_attribute::<ReasonKey>(reason)
    }

    /// The outermost attached reason, or [`ResultReason::Unset`].
    ///
    /// # Panics
    ///
    /// Panics if the reason slot holds a value of another type, which
    /// indicates a bug in this crate rather than a bad input.
    pub fn result_reason(&self) -> ResultReason {
        self.attribute::<ReasonKey>().copied().unwrap_or_default()
    }
}

pub fn with_result_reason(err: impl Into<Error>, reason: ResultReason) -> Error {
    err.into().with_result_reason(reason)
}

/// The reason a response builder should report for `err`.
///
/// Never fails: no error, or no attached reason, gives
/// [`ResultReason::Unset`].
pub fn get_result_reason(err: Option<&Error>) -> ResultReason {
    err.map(Error::result_reason).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn unset_when_absent() {
        let err = Error::from(CodecError::InvalidLen);
        assert_eq!(err.result_reason(), ResultReason::Unset);
        assert_eq!(get_result_reason(None), ResultReason::Unset);
    }

    #[test]
    fn roundtrip() {
        let err = with_result_reason(CodecError::InvalidLen, ResultReason::InvalidMessage);
        assert_eq!(get_result_reason(Some(&err)), ResultReason::InvalidMessage);
    }

    #[test]
    fn last_attached_wins() {
        let err = Error::wrap(CodecError::InvalidTag)
            .with_result_reason(ResultReason::InvalidField);
        let err = Error::wrap(err).with_result_reason(ResultReason::InvalidMessage);
        assert_eq!(err.result_reason(), ResultReason::InvalidMessage);
    }

    #[test]
    fn reason_survives_later_wraps() {
        let err = Error::from(CodecError::NoTag)
            .with_result_reason(ResultReason::MissingData)
            .prepend("Operation");
        assert_eq!(err.result_reason(), ResultReason::MissingData);
    }

    #[test]
    #[should_panic(expected = "wrong type")]
    fn wrong_type_in_reason_slot_panics() {
        let err = Error::from(CodecError::NoTag).with_forged_attribute::<ReasonKey>("nope");
        let _ = err.result_reason();
    }
}
