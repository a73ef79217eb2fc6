use std::env;
use std::sync::OnceLock;

/// Process-wide trace capture settings.
///
/// Every tagged error records its caller location, which costs nothing.
/// Full backtraces are opt-in: capturing one walks the stack on every
/// wrap, which is too slow to leave on while decoding large messages.
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────────────┐
/// │ Field             │ Purpose                                      │
/// ├───────────────────┼──────────────────────────────────────────────┤
/// │ capture_backtrace │ Walk the stack (unresolved) at each wrap      │
/// │ max_frames        │ Frames kept when the trace is rendered        │
/// └───────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// The configuration is fixed the first time an error is wrapped. Call
/// [`TraceConfig::install`] before that point to override the
/// environment-derived default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceConfig {
    pub capture_backtrace: bool,
    pub max_frames: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            capture_backtrace: false,
            max_frames: 32,
        }
    }
}

/// Variables consulted by [`TraceConfig::from_env`], first match wins.
const ENV_VARS: [&str; 3] = ["TTLV_BACKTRACE", "RUST_LIB_BACKTRACE", "RUST_BACKTRACE"];

impl TraceConfig {
    /// Defaults, with backtrace capture enabled when the first of
    /// `TTLV_BACKTRACE`, `RUST_LIB_BACKTRACE` or `RUST_BACKTRACE` that is
    /// set holds anything other than `0`.
    pub fn from_env() -> Self {
        let capture_backtrace = ENV_VARS
            .iter()
            .find_map(|name| env::var(name).ok())
            .is_some_and(|value| value != "0");
        Self {
            capture_backtrace,
            ..Self::default()
        }
    }

    /// Make this the process-wide configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInstalled`] if a configuration was
    /// installed earlier, or if an error was already wrapped (which
    /// fixes the environment default in place).
    pub fn install(self) -> Result<(), ConfigError> {
        CONFIG
            .set(self)
            .map_err(|_| ConfigError::AlreadyInstalled)
    }

    /// The configuration in effect.
    pub fn current() -> &'static TraceConfig {
        CONFIG.get_or_init(Self::from_env)
    }
}

static CONFIG: OnceLock<TraceConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("trace configuration is already fixed for this process")]
    AlreadyInstalled,
}
