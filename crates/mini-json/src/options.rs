//! Decoder configuration.
//!
//! The defaults reproduce the permissive scanner: keywords are recognized by
//! their first letter, trailing text after the top-level value is ignored and
//! nesting depth is limited only by the call stack. Each check can be turned
//! on separately.

/// Depth used by [`DecoderOptions::strict`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderOptions {
    /// Require `null`, `true` and `false` to be spelled out in full.
    pub strict_literals: bool,
    /// Allow only whitespace after the top-level value.
    pub reject_trailing: bool,
    /// Maximum array/object nesting depth.
    pub max_depth: Option<usize>,
}

impl DecoderOptions {
    /// No validation beyond what the scanner needs to make progress.
    pub const fn permissive() -> Self {
        Self {
            strict_literals: false,
            reject_trailing: false,
            max_depth: None,
        }
    }

    /// Every check on, depth capped at [`DEFAULT_MAX_DEPTH`].
    pub const fn strict() -> Self {
        Self {
            strict_literals: true,
            reject_trailing: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    pub const fn with_strict_literals(mut self, on: bool) -> Self {
        self.strict_literals = on;
        self
    }

    pub const fn with_reject_trailing(mut self, on: bool) -> Self {
        self.reject_trailing = on;
        self
    }

    pub const fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}
