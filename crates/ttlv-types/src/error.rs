/// Errors raised when a raw wire value has no matching enum variant.
///
/// These are deliberately plain: the codec in `ttlv-wire` converts them
/// into tagged `ttlv_errors::Error` values (with the sentinel root cause
/// the diagnostics layer expects) at the point it reads the byte.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A wire code did not match any known variant of `enum_name`.
    #[error("invalid {enum_name} value: {value:#04X}")]
    UnknownValue { enum_name: &'static str, value: u32 },

    /// A display name did not match any known variant of `enum_name`.
    #[error("unknown {enum_name} name: {name:?}")]
    UnknownName { enum_name: &'static str, name: String },
}
