//! Source positions and spans.
//!
//! A `Position` is a byte offset plus the zero-based line and column it
//! falls on. A `Span` is a pair of positions, so the renderer never has to
//! rescan the source to find line numbers.

use std::fmt;

/// A single point in the source text.
///
/// Line and column are zero-based; `Display` prints them one-based.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Start of any source.
    pub const START: Position = Position {
        offset: 0,
        line: 0,
        column: 0,
    };

    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    /// Step past `ch`, moving to the next line on `'\n'`.
    #[inline]
    #[must_use]
    pub fn advance(self, ch: char) -> Position {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "char::len_utf8 is at most 4"
        )]
        let width = ch.len_utf8() as u32;
        if ch == '\n' {
            Position {
                offset: self.offset + width,
                line: self.line + 1,
                column: 0,
            }
        } else {
            Position {
                offset: self.offset + width,
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.offset, self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Source location span, `start` inclusive and `end` exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Dummy span for synthesized nodes and native values.
    pub const DUMMY: Span = Span {
        start: Position::START,
        end: Position::START,
    };

    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Zero-width span at a position.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.offset - self.start.offset
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }

    /// Span from the start of `self` to the end of `other`.
    #[inline]
    #[must_use]
    pub const fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    /// Byte range for slicing the source text.
    #[inline]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}
