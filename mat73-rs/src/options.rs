//! Decoder configuration.

/// Default bound on structural nesting (struct-of-cell-of-struct chains).
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Options controlling a decode.
///
/// # Example
///
/// ```
/// use mat73_rs::DecodeOptions;
///
/// let options = DecodeOptions::new().max_depth(64);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest nesting accepted before failing with
    /// [`Error::MaxDepthExceeded`](crate::Error::MaxDepthExceeded).
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
