use crate::constants::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

/// Which values may appear in object key position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Keys must be strings.
    #[default]
    StringOnly,
    /// Literal and number keys are accepted by their raw text. Container
    /// keys are still rejected.
    Coerce,
}

/// What happens to input left over after the first complete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingContent {
    #[default]
    Ignore,
    Reject,
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub max_depth: usize,
    pub key_policy: KeyPolicy,
    pub trailing: TrailingContent,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values above [`MAX_DEPTH_LIMIT`] are clamped to it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingContent) -> Self {
        self.trailing = trailing;
        self
    }

    /// Reject trailing content and keep string-only keys.
    pub fn strict() -> Self {
        Self::default().with_trailing(TrailingContent::Reject)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            key_policy: KeyPolicy::default(),
            trailing: TrailingContent::default(),
        }
    }
}
