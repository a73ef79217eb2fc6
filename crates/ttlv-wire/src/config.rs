/// Limits applied while decoding.
///
/// Every structure level costs at least one 8-byte header, so without a
/// depth limit a hostile message of a few megabytes could recurse deep
/// enough to exhaust the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum structure nesting depth. The top-level item is depth 0.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}
