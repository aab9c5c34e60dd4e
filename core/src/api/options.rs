//! Configuration options for the behavior engine.

/// Configuration options for the engine.
///
/// Both limits protect graph construction from hostile or corrupt
/// intermediate code.
///
/// # Example
///
/// ```
/// use xabsl_core::api::EngineOptions;
///
/// let options = EngineOptions {
///     max_token_length: 200,
///     ..EngineOptions::default()
/// };
/// assert_eq!(options.max_nesting_depth, 64);
/// ```
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Longest accepted token of the intermediate code, in bytes.
    ///
    /// Default: 100
    pub max_token_length: usize,

    /// Deepest accepted nesting of expressions and decision trees.
    ///
    /// Default: 64
    pub max_nesting_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_token_length: 100,
            max_nesting_depth: 64,
        }
    }
}
