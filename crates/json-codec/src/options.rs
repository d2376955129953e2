//! Codec configuration.

/// Default nesting limit, the same as serde_json's parser default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options shared by every operation of a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Emit indented, multi-line JSON text instead of compact text.
    pub pretty: bool,
    /// Maximum number of nested levels (record fields, sequence elements,
    /// map entries) an encode or decode may descend into. Decoding checks it
    /// against the text before parsing, so it may be set above 128.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
