//! Character cursor for the KV3 parser.
//!
//! Tracks byte offset, line and column as it advances so parse errors can
//! point at the offending spot.

/// Position in source text (line and column are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of the source
    pub byte: usize,
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
}

/// Peekable character cursor with position tracking
pub struct Cursor<'a> {
    source: &'a str,
    byte: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `source`
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position
    pub const fn position(&self) -> Position {
        Position {
            byte: self.byte,
            line: self.line,
            column: self.column,
        }
    }

    /// Whether all input has been consumed
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Current character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Whether the unconsumed input starts with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume one character
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `prefix` if the input starts with it
    pub fn eat(&mut self, prefix: &str) -> bool {
        if !self.starts_with(prefix) {
            return false;
        }
        for _ in prefix.chars() {
            self.advance();
        }
        true
    }

    /// Consume characters while `predicate` holds
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Source text between two byte offsets
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    fn rest(&self) -> &'a str {
        &self.source[self.byte..]
    }
}
