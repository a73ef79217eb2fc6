wire_enum! {
  /// Protocol-level failure categories reportable to a peer.
  ///
  /// A response builder reads one of these off a failed operation's
  /// error and copies it into the `ResultReason` field of the batch item.
  /// `Unset` (wire code 0) is the zero value: it means no reason was
  /// attached, and is never sent on the wire.
  ///
  /// ```text
  /// ┌───────────┬──────────────────────────────────────┐
  /// │ Wire      │ Variant                              │
  /// ├───────────┼──────────────────────────────────────┤
  /// │ 0x0000    │ Unset                                │
  /// │ 0x0001    │ ItemNotFound                         │
  /// │ 0x0002    │ ResponseTooLarge                     │
  /// │ 0x0003    │ AuthenticationNotSuccessful          │
  /// │ 0x0004    │ InvalidMessage                       │
  /// │ 0x0005    │ OperationNotSupported                │
  /// │ 0x0006    │ MissingData                          │
  /// │ 0x0007    │ InvalidField                         │
  /// │ 0x0008    │ FeatureNotSupported                  │
  /// │ 0x0009    │ OperationCanceledByRequester         │
  /// │ 0x000A    │ CryptographicFailure                 │
  /// │ 0x000B    │ IllegalOperation                     │
  /// │ 0x000C    │ PermissionDenied                     │
  /// │ 0x000D    │ ObjectArchived                       │
  /// │ 0x000E    │ IndexOutOfBounds                     │
  /// │ 0x000F    │ ApplicationNamespaceNotSupported     │
  /// │ 0x0010    │ KeyFormatTypeNotSupported            │
  /// │ 0x0011    │ KeyCompressionTypeNotSupported       │
  /// │ 0x0100    │ GeneralFailure                       │
  /// └───────────┴──────────────────────────────────────┘
  /// ```
  #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
  pub enum ResultReason: u32 {
    #[default]
    Unset = 0x0000 => "Unset",
    ItemNotFound = 0x0001 => "ItemNotFound",
    ResponseTooLarge = 0x0002 => "ResponseTooLarge",
    AuthenticationNotSuccessful = 0x0003 => "AuthenticationNotSuccessful",
    InvalidMessage = 0x0004 => "InvalidMessage",
    OperationNotSupported = 0x0005 => "OperationNotSupported",
    MissingData = 0x0006 => "MissingData",
    InvalidField = 0x0007 => "InvalidField",
    FeatureNotSupported = 0x0008 => "FeatureNotSupported",
    OperationCanceledByRequester = 0x0009 => "OperationCanceledByRequester",
    CryptographicFailure = 0x000A => "CryptographicFailure",
    IllegalOperation = 0x000B => "IllegalOperation",
    PermissionDenied = 0x000C => "PermissionDenied",
    ObjectArchived = 0x000D => "ObjectArchived",
    IndexOutOfBounds = 0x000E => "IndexOutOfBounds",
    ApplicationNamespaceNotSupported = 0x000F => "ApplicationNamespaceNotSupported",
    KeyFormatTypeNotSupported = 0x0010 => "KeyFormatTypeNotSupported",
    KeyCompressionTypeNotSupported = 0x0011 => "KeyCompressionTypeNotSupported",
    GeneralFailure = 0x0100 => "GeneralFailure",
  }
}

impl ResultReason {
    /// Whether a reason was actually attached.
    pub fn is_set(self) -> bool {
        self != Self::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert_eq!(ResultReason::default(), ResultReason::Unset);
        assert_eq!(ResultReason::default().to_wire(), 0);
        assert!(!ResultReason::default().is_set());
    }

    #[test]
    fn codes_roundtrip() {
        for &reason in ResultReason::ALL {
            assert_eq!(ResultReason::from_wire(reason.to_wire()).unwrap(), reason);
        }
    }

    #[test]
    fn general_failure_code() {
        assert_eq!(ResultReason::GeneralFailure.to_wire(), 0x0100);
        assert!(ResultReason::from_wire(0x0012).is_err());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            ResultReason::from_name("InvalidField").unwrap(),
            ResultReason::InvalidField
        );
        assert!(ResultReason::from_name("invalid field").is_err());
    }
}
