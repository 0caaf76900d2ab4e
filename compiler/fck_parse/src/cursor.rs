//! Token cursor for navigating the token stream.
//!
//! Provides token access, one-token lookahead, and consumption. The cursor
//! never moves past the final `Eof`, so `current()` is always a real token.

use fck_diagnostic::{Diagnostic, ErrorKind};
use fck_ir::{Keyword, Name, Span, StringInterner, Token, TokenKind, TokenList};

static MISSING_EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position in the token stream.
    ///
    /// Compared before and after a production to tell whether it consumed
    /// anything.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Roll back to a position returned by `position()`.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.tokens.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.as_slice().last())
            .unwrap_or(&MISSING_EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::point(self.current_span().start),
        }
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_keyword(&self, kw: Keyword) -> bool {
        self.current_kind().is_keyword(kw)
    }

    /// Whether the current token ends a statement or an enclosing group.
    pub fn at_boundary(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Newline
                | TokenKind::Eof
                | TokenKind::RBrace
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::Comma
        )
    }

    /// Consume the current token. Stays put on `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Human-readable description of the current token for messages.
    pub fn describe_current(&self) -> String {
        describe(self.current_kind(), self.interner)
    }

    /// Consume an identifier or fail with `kind`, naming what was found.
    pub fn expect_ident(&mut self, kind: ErrorKind) -> Result<Name, Diagnostic> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name)
        } else {
            Err(Diagnostic::error(kind, self.current_span()).with_arg(self.describe_current()))
        }
    }
}

/// Describe a token kind the way messages quote it.
pub(crate) fn describe(kind: TokenKind, interner: &StringInterner) -> String {
    match kind {
        TokenKind::Int(n) => format!("integer {n}"),
        TokenKind::Float(v) => format!("float {v}"),
        TokenKind::Str(name) => format!("string {:?}", interner.lookup(name)),
        TokenKind::Ident(name) => format!("identifier '{}'", interner.lookup(name)),
        TokenKind::Keyword(kw) => format!("keyword '{}'", kw.as_str()),
        TokenKind::Newline | TokenKind::Eof => kind.display_name().to_string(),
        other => format!("'{}'", other.display_name()),
    }
}
