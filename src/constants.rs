pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Hard ceiling on nesting; each level is one native recursion step.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Number of characters before the failure point shown in a diagnostic.
pub const CONTEXT_WIDTH: usize = 50;

pub const MARKER: &str = "^^^";

#[inline]
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

#[inline]
pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
