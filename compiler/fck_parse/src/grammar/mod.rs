//! Statement-level grammar.
//!
//! # Module Structure
//!
//! - `mod.rs`: statement lists, blocks, `return`/`break`/`continue`
//! - `expr/`: declarations, assignment and the operator precedence chain

mod expr;

use fck_diagnostic::{Diagnostic, ErrorKind};
use fck_ir::{ExprId, ExprKind, Keyword, TokenKind};
use tracing::trace;

use crate::{ParseOutcome, Parser};

/// Statements up to a closing brace or the end of input.
pub(crate) struct Statements {
    pub exprs: Vec<ExprId>,
    /// Why the list ended early, when it stopped at a token that cannot
    /// start a statement.
    pub stopped: Option<Diagnostic>,
}

impl Parser<'_> {
    /// Parse newline-separated statements until `}` or `Eof`.
    pub(crate) fn statements(&mut self) -> Result<Statements, Diagnostic> {
        let mut exprs = Vec::new();
        let mut stopped = None;
        loop {
            self.cursor.skip_newlines();
            if self.cursor.is_at_end() || self.cursor.check(TokenKind::RBrace) {
                break;
            }
            match self.statement() {
                ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value } => {
                    exprs.push(value);
                }
                ParseOutcome::ConsumedErr { error } => return Err(error),
                ParseOutcome::EmptyErr { error } => {
                    stopped = Some(error);
                    break;
                }
            }
            match self.cursor.current_kind() {
                TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof => {}
                // The caller reports the bracket it was expecting instead.
                TokenKind::RParen | TokenKind::RBracket => break,
                _ => {
                    return Err(fck_diagnostic::unexpected_token(
                        self.cursor.current_span(),
                        &self.cursor.describe_current(),
                    ));
                }
            }
        }
        trace!(count = exprs.len(), "statements");
        Ok(Statements { exprs, stopped })
    }

    /// `{ statements }`
    pub(crate) fn block(&mut self) -> ParseOutcome<ExprId> {
        let open = self.cursor.current_span();
        if !self.cursor.eat(TokenKind::LBrace) {
            return ParseOutcome::empty_err(self.expected("'{'"));
        }
        let body = commit!(self.statements());
        let close = commit!(self.expect_closer(TokenKind::RBrace, open, body.stopped));
        let list = self.arena.alloc_expr_list(body.exprs);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::Block(list), open.merge(close)))
    }

    fn statement(&mut self) -> ParseOutcome<ExprId> {
        match self.cursor.current_kind() {
            TokenKind::Keyword(Keyword::Return) => self.return_statement(),
            TokenKind::Keyword(kw @ (Keyword::Break | Keyword::Continue)) => {
                self.loop_control(kw)
            }
            _ => self.expr(),
        }
    }

    /// `return [value] [if cond]`
    fn return_statement(&mut self) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let value = if self.cursor.at_boundary() || self.cursor.check_keyword(Keyword::If) {
            None
        } else {
            Some(require!(self.expr()))
        };
        let guard = require!(self.guard());
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::Return { value, guard }, span))
    }

    /// `break [@label] [if cond]` and `continue [@label] [if cond]`
    fn loop_control(&mut self, keyword: Keyword) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        if self.loops.is_empty() {
            return ParseOutcome::consumed_err(fck_diagnostic::unexpected_token(
                start,
                &format!("'{}' outside of a loop", keyword.as_str()),
            ));
        }

        let label = if self.cursor.eat(TokenKind::At) {
            let label_span = self.cursor.current_span();
            let name = commit!(self.cursor.expect_ident(ErrorKind::ExpectedLoopIdentifier));
            if !self.loops.contains(&Some(name)) {
                return ParseOutcome::consumed_err(
                    Diagnostic::error(ErrorKind::UndefinedLoopIdentifier, label_span)
                        .with_arg(self.name_str(name)),
                );
            }
            Some(name)
        } else {
            None
        };

        let guard = require!(self.guard());
        let span = self.span_from(start);
        let kind = if keyword == Keyword::Break {
            ExprKind::Break { label, guard }
        } else {
            ExprKind::Continue { label, guard }
        };
        ParseOutcome::consumed_ok(self.alloc(kind, span))
    }

    /// Optional trailing `if cond` on a control statement.
    fn guard(&mut self) -> ParseOutcome<Option<ExprId>> {
        if !self.cursor.eat_keyword(Keyword::If) {
            return ParseOutcome::empty_ok(None);
        }
        let cond = require!(self.ternary());
        ParseOutcome::consumed_ok(Some(cond))
    }
}
