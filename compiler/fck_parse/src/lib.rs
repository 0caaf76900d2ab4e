//! Recursive descent parser for fck.
//!
//! Produces a flat AST in an `ExprArena`. Every production returns a
//! `ParseOutcome` so callers can tell a soft failure (nothing consumed, try
//! something else or stop) from a hard one (committed, report it).

#[macro_use]
mod outcome;
mod cursor;
mod grammar;

pub use cursor::Cursor;
pub use outcome::ParseOutcome;

use fck_diagnostic::{unmatched_bracket, Diagnostic, ErrorKind};
use fck_ir::{Expr, ExprArena, ExprId, ExprKind, Name, Span, StringInterner, TokenKind, TokenList};
use tracing::debug;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    /// Labels of the loops enclosing the current position, innermost last.
    /// Reset inside function bodies.
    loops: Vec<Option<Name>>,
    warnings: Vec<Diagnostic>,
}

/// Result of parsing one input.
///
/// `root` is always a valid `Block`, but only worth evaluating when
/// `error` is `None`.
#[derive(Debug)]
pub struct ParseOutput {
    pub arena: ExprArena,
    pub root: ExprId,
    pub error: Option<Diagnostic>,
    /// Non-fatal findings, in source order.
    pub warnings: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            arena: ExprArena::with_capacity(tokens.len() * 4),
            loops: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Parse the whole token stream as a program.
    pub fn parse_program(mut self) -> ParseOutput {
        let start = self.cursor.current_span();
        let (statements, error) = match self.statements() {
            Ok(block) if self.cursor.is_at_end() => (block.exprs, None),
            Ok(block) => {
                let error = self.stray_token_error(block.stopped);
                (block.exprs, Some(error))
            }
            Err(error) => (Vec::new(), Some(error)),
        };

        let span = start.merge(self.cursor.previous_span());
        let list = self.arena.alloc_expr_list(statements);
        let root = self.alloc(ExprKind::Block(list), span);
        ParseOutput {
            arena: self.arena,
            root,
            error,
            warnings: self.warnings,
        }
    }

    /// Top-level input stopped before `Eof`.
    fn stray_token_error(&self, stopped: Option<Diagnostic>) -> Diagnostic {
        let token = self.cursor.current();
        if let Some(open) = opener_of(token.kind) {
            return unmatched_bracket(token.span, token.kind.display_name(), open);
        }
        stopped.unwrap_or_else(|| {
            fck_diagnostic::unexpected_token(token.span, &self.cursor.describe_current())
        })
    }

    // ─── Helpers ───

    #[inline]
    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// From `start` to the end of the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    fn name_str(&self, name: Name) -> &'static str {
        self.cursor.interner().lookup(name)
    }

    /// `Expected <what>, found <current token>`.
    fn expected(&self, what: &str) -> Diagnostic {
        Diagnostic::error(ErrorKind::ExpectedChar, self.cursor.current_span())
            .with_arg(format_args!("{what}, found {}", self.cursor.describe_current()))
    }

    fn expected_expression(&self) -> Diagnostic {
        fck_diagnostic::expected_expression(
            self.cursor.current_span(),
            &self.cursor.describe_current(),
        )
    }

    /// Consume the bracket closing one opened at `open`.
    ///
    /// Running out of input reports the opener as unmatched; any other token
    /// reports `stopped` (why the contents ended early) when there is one.
    fn expect_closer(
        &mut self,
        close: TokenKind,
        open: Span,
        stopped: Option<Diagnostic>,
    ) -> Result<Span, Diagnostic> {
        self.cursor.skip_newlines();
        if self.cursor.check(close) {
            return Ok(self.cursor.advance().span);
        }
        let open_symbol = opener_of(close).unwrap_or("(");
        if self.cursor.is_at_end() {
            return Err(unmatched_bracket(open, open_symbol, close.display_name()));
        }
        Err(stopped.unwrap_or_else(|| self.expected(&format!("'{}'", close.display_name()))))
    }
}

/// The opening bracket for a closing bracket token.
fn opener_of(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::RParen => Some("("),
        TokenKind::RBrace => Some("{"),
        TokenKind::RBracket => Some("["),
        _ => None,
    }
}

/// Parse a token list into an AST.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> ParseOutput {
    let output = Parser::new(tokens, interner).parse_program();
    debug!(
        exprs = output.arena.expr_count(),
        error = output.error.is_some(),
        warnings = output.warnings.len(),
        "parsed"
    );
    output
}
