//! Parser configuration

/// Maximum production nesting before a parse is abandoned
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Highest accepted nesting limit. Each production takes a few stack frames,
/// so deeper limits could overflow the thread stack before the limit is hit.
pub const MAX_DEPTH_CEILING: usize = 512;

/// Snapshot budget used by the viewer (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

/// How closely token consumption follows the reference behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Reproduce the reference consumption counts: an extra advance after
    /// every statement and after every expression, `result` as the return
    /// keyword, no leading term in an expression.
    Reference,
    /// One token per terminal.
    #[default]
    Standard,
}

impl ParseMode {
    pub fn name(self) -> &'static str {
        match self {
            ParseMode::Reference => "reference",
            ParseMode::Standard => "standard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    pub max_depth: usize,
    /// Record a parse trace within this many bytes; `None` disables tracing
    pub snapshot_limit: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        ParseOptions {
            mode: ParseMode::Standard,
            max_depth: DEFAULT_MAX_DEPTH,
            snapshot_limit: None,
        }
    }

    pub fn reference() -> Self {
        ParseOptions::new().with_mode(ParseMode::Reference)
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the nesting limit, clamped to [`MAX_DEPTH_CEILING`]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_CEILING);
        self
    }

    pub fn with_snapshot_limit(mut self, bytes: usize) -> Self {
        self.snapshot_limit = Some(bytes);
        self
    }

    /// The nesting limit in force, even if `max_depth` was set directly
    pub(crate) fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }

    pub(crate) fn is_reference(&self) -> bool {
        self.mode == ParseMode::Reference
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
