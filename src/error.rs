use std::fmt;

use memchr::{memchr_iter, memrchr};
use thiserror::Error;

use crate::constants::{CONTEXT_WIDTH, MARKER};

/// What the parser was looking for when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Value,
    Char(char),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value => f.write_str("a value"),
            Expected::Char(ch) => write!(f, "'{ch}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("expected '{expected}' but got '{found}' instead")]
    UnexpectedToken { expected: char, found: char },
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(Expected),
    #[error("object key must be a string, got {0}")]
    InvalidKey(&'static str),
    #[error("nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
    #[error("unexpected trailing character '{0}'")]
    TrailingContent(char),
}

/// Byte offset plus 1-based line and column (in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    fn locate(input: &str, offset: usize) -> Self {
        let head = input.get(..offset).unwrap_or(input);
        let line = memchr_iter(b'\n', head.as_bytes()).count() + 1;
        let line_start = memrchr(b'\n', head.as_bytes()).map_or(0, |idx| idx + 1);
        let column = head[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Source context preceding a failure, whitespace removed, with the caret
/// marker placed right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Excerpt {
    context: String,
}

impl Excerpt {
    fn capture(input: &str, offset: usize) -> Self {
        let head = input.get(..offset).unwrap_or(input);
        let begin = head
            .char_indices()
            .rev()
            .nth(CONTEXT_WIDTH - 1)
            .map_or(0, |(idx, _)| idx);
        let context = head[begin..]
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        Self { context }
    }

    fn padding(&self) -> String {
        " ".repeat(self.context.chars().count())
    }
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.padding();
        write!(f, "{}\n{padding}{MARKER}\n{padding}", self.context)
    }
}

/// The single diagnostic raised by the parser.
///
/// Rendering via `Display` yields the excerpt, the caret marker and the
/// message on three lines, e.g.
///
/// ```text
/// [1
///   ^^^
///   expected ',' but got '2' instead at position 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{excerpt}{kind} at position {position}")]
pub struct SyntaxError {
    kind: ErrorKind,
    position: usize,
    location: Location,
    excerpt: Excerpt,
}

impl SyntaxError {
    pub(crate) fn report(input: &str, position: usize, kind: ErrorKind) -> Self {
        Self {
            kind,
            position,
            location: Location::locate(input, position),
            excerpt: Excerpt::capture(input, position),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 0-based byte offset into the input.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn context(&self) -> &str {
        &self.excerpt.context
    }

    /// The message without the excerpt or position suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(err) => Some(err),
            _ => None,
        }
    }
}
