use crate::constants::is_whitespace;

/// Read position over one input.
///
/// `current` is the byte offset of the next unread character and `start`
/// the offset where the running grammar rule began. Both stay on char
/// boundaries and `start <= current <= input.len()` always holds; `None` is
/// the end-of-input sentinel returned by every read primitive.
pub struct Cursor<'a> {
    input: &'a str,
    current: usize,
    start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            current: 0,
            start: 0,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn is_end_of_input(&self) -> bool {
        self.current >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.char_at(self.current)
    }

    /// The character after the one under the cursor.
    pub fn peek_next(&self) -> Option<char> {
        let ch = self.peek()?;
        self.char_at(self.current + ch.len_utf8())
    }

    /// Consumes one character. A no-op at end of input.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        Some(ch)
    }

    /// Consumes characters while `predicate` holds.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.current += ch.len_utf8();
        }
    }

    /// Moves directly to `offset`, which must be a char boundary at or after
    /// the current position.
    pub(crate) fn jump_to(&mut self, offset: usize) {
        debug_assert!(offset >= self.current && self.input.is_char_boundary(offset));
        self.current = offset.min(self.input.len());
    }

    pub fn skip_whitespace(&mut self) {
        self.advance_while(is_whitespace);
    }

    pub fn mark_start(&mut self) {
        self.start = self.current;
    }

    pub fn slice_from_start(&self) -> &'a str {
        &self.input[self.start..self.current]
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.current..]
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        let bytes = self.input.as_bytes();
        match bytes.get(offset) {
            Some(&byte) if byte.is_ascii() => Some(byte as char),
            Some(_) => self.input.get(offset..)?.chars().next(),
            None => None,
        }
    }
}
