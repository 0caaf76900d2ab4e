//! Postfix operators: call, index, attribute access, cast.

use fck_diagnostic::{Diagnostic, ErrorKind, WarningKind};
use fck_ir::{AssignOp, CallArg, ExprId, ExprKind, IndexSpec, Keyword, TokenKind};

use crate::{ParseOutcome, Parser};

impl Parser<'_> {
    pub(super) fn postfix(&mut self) -> ParseOutcome<ExprId> {
        let mut expr = chain!(self.atom());
        loop {
            expr = match self.cursor.current_kind() {
                TokenKind::LParen => require!(self.call(expr)),
                TokenKind::LBracket => require!(self.index(expr)),
                TokenKind::Dot => {
                    self.cursor.advance();
                    let attr = commit!(self.cursor.expect_ident(ErrorKind::ExpectedAttribute));
                    let span = self.span_from(self.span_of(expr));
                    self.alloc(ExprKind::Attribute { target: expr, attr }, span)
                }
                TokenKind::Keyword(Keyword::As) => {
                    self.cursor.advance();
                    let TokenKind::Keyword(kw) = self.cursor.current_kind() else {
                        return ParseOutcome::consumed_err(self.type_error());
                    };
                    let Some(ty) = kw.type_kind() else {
                        return ParseOutcome::consumed_err(self.type_error());
                    };
                    self.cursor.advance();
                    let span = self.span_from(self.span_of(expr));
                    self.alloc(ExprKind::Cast { expr, ty }, span)
                }
                _ => break,
            };
        }
        ParseOutcome::consumed_ok(expr)
    }

    fn type_error(&self) -> Diagnostic {
        Diagnostic::error(ErrorKind::ExpectedType, self.cursor.current_span())
            .with_arg(self.cursor.describe_current())
    }

    /// `callee(arg, name :: arg, ...)`
    fn call(&mut self, callee: ExprId) -> ParseOutcome<ExprId> {
        let open = self.cursor.advance().span;
        let mut args = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            let start = self.cursor.current_span();
            let name = match (self.cursor.current_kind(), self.cursor.peek_kind()) {
                (TokenKind::Ident(name), TokenKind::Set(AssignOp::Plain)) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    Some(name)
                }
                (TokenKind::Ident(name), TokenKind::SetYield(AssignOp::Plain)) => {
                    self.cursor.advance();
                    let op_span = self.cursor.advance().span;
                    self.warnings.push(
                        Diagnostic::warning(WarningKind::FuncAssignOperator, op_span)
                            .with_arg(self.name_str(name)),
                    );
                    Some(name)
                }
                _ => None,
            };
            let value = require!(self.ternary());
            let span = self.span_from(start);
            args.push(CallArg { name, value, span });

            self.cursor.skip_newlines();
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        let close = commit!(self.expect_closer(TokenKind::RParen, open, None));

        let args = self.arena.alloc_call_args(args);
        let span = self.span_of(callee).merge(close);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::Call { callee, args }, span))
    }

    /// `target[spec, ...]` where a spec is `i` or `start to end`.
    ///
    /// An empty `[]` is the target itself.
    fn index(&mut self, target: ExprId) -> ParseOutcome<ExprId> {
        let open = self.cursor.advance().span;
        self.cursor.skip_newlines();
        if self.cursor.eat(TokenKind::RBracket) {
            return ParseOutcome::consumed_ok(target);
        }

        let mut specs = Vec::new();
        loop {
            let start = require!(self.ternary());
            if self.cursor.eat_keyword(Keyword::To) {
                let end = require!(self.ternary());
                specs.push(IndexSpec::Range { start, end });
            } else {
                specs.push(IndexSpec::Single(start));
            }
            self.cursor.skip_newlines();
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        let close = commit!(self.expect_closer(TokenKind::RBracket, open, None));

        let specs = self.arena.alloc_index_specs(specs);
        let span = self.span_of(target).merge(close);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::Index { target, specs }, span))
    }
}
