//! Character cursor with position tracking.
//!
//! The cursor walks the source one `char` at a time and keeps the current
//! `Position` up to date, so every token gets its line and column without a
//! second pass. Lookahead past the end returns `'\0'`, which never starts a
//! token; `is_eof()` tells it apart from an interior NUL.

use fck_ir::Position;

#[derive(Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    /// Start a cursor at `start`, whose offset indexes into `text`.
    pub fn new(text: &'a str, start: Position) -> Self {
        Cursor { text, pos: start }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.text.get(self.pos.offset as usize..).unwrap_or("")
    }

    /// The character under the cursor, `'\0'` at the end.
    #[inline]
    pub fn current(&self) -> char {
        self.rest().chars().next().unwrap_or('\0')
    }

    /// The character after the current one.
    #[inline]
    pub fn peek(&self) -> char {
        self.rest().chars().nth(1).unwrap_or('\0')
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest().is_empty()
    }

    /// Advance past the current character. No-op at the end.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.pos = self.pos.advance(ch);
        }
    }

    /// Consume the current character if it is `expected`.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        if !self.is_eof() && self.current() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Rewind to a position previously returned by `position()`.
    #[inline]
    pub fn reset(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Source text between a saved position and the cursor.
    pub fn slice_from(&self, start: Position) -> &'a str {
        self.text
            .get(start.offset as usize..self.pos.offset as usize)
            .unwrap_or("")
    }
}
