//! Primary expressions: literals, names, groups and the block-bodied
//! constructs (`if`, `case`, loops, `def`).

use fck_diagnostic::{Diagnostic, ErrorKind, WarningKind};
use fck_ir::{AssignOp, CaseArm, ExprId, ExprKind, IfBranch, Keyword, Name, Param, Span, TokenKind};
use tracing::trace;

use crate::{ParseOutcome, Parser};

impl Parser<'_> {
    pub(super) fn atom(&mut self) -> ParseOutcome<ExprId> {
        let token = self.cursor.current();
        let literal = match token.kind {
            TokenKind::Int(n) => ExprKind::Int(n),
            TokenKind::Float(v) => ExprKind::Float(v),
            TokenKind::Str(name) => ExprKind::Str(name),
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::LParen => return self.paren(),
            TokenKind::LBracket => return self.list_literal(),
            TokenKind::At => return self.labelled_loop(),
            TokenKind::Keyword(Keyword::If) => return self.if_expr(),
            TokenKind::Keyword(Keyword::Case) => return self.case_expr(),
            TokenKind::Keyword(Keyword::Iterate) => return self.iterate(None, token.span),
            TokenKind::Keyword(Keyword::While) => return self.while_loop(None, token.span),
            TokenKind::Keyword(Keyword::Def) => return self.func_def(),
            _ => return ParseOutcome::empty_err(self.expected_expression()),
        };
        self.cursor.advance();
        ParseOutcome::consumed_ok(self.alloc(literal, token.span))
    }

    /// `( expr )`. The group is transparent: the inner node is returned.
    fn paren(&mut self) -> ParseOutcome<ExprId> {
        let open = self.cursor.advance().span;
        self.cursor.skip_newlines();
        let inner = require!(self.expr());
        commit!(self.expect_closer(TokenKind::RParen, open, None));
        ParseOutcome::consumed_ok(inner)
    }

    /// `[a, b, ...]`
    fn list_literal(&mut self) -> ParseOutcome<ExprId> {
        let open = self.cursor.advance().span;
        let mut items = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.check(TokenKind::RBracket) && !self.cursor.is_at_end() {
            items.push(require!(self.ternary()));
            self.cursor.skip_newlines();
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        let close = commit!(self.expect_closer(TokenKind::RBracket, open, None));
        let list = self.arena.alloc_expr_list(items);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::List(list), open.merge(close)))
    }

    // ─── Conditionals ───

    /// `if cond {..} elif cond {..} else {..}`
    ///
    /// `elif` and `else` may start on a later line.
    fn if_expr(&mut self) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let mut branches = Vec::new();
        let cond = require!(self.logical());
        let body = require!(self.block());
        branches.push(IfBranch { cond, body });

        let mut else_branch = None;
        loop {
            let before = self.cursor.position();
            self.cursor.skip_newlines();
            if self.cursor.eat_keyword(Keyword::Elif) {
                let cond = require!(self.logical());
                let body = require!(self.block());
                branches.push(IfBranch { cond, body });
            } else if self.cursor.eat_keyword(Keyword::Else) {
                else_branch = Some(require!(self.block()));
                break;
            } else {
                self.cursor.set_position(before);
                break;
            }
        }

        let branches = self.arena.alloc_if_branches(branches);
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(
            ExprKind::If {
                branches,
                else_branch,
            },
            span,
        ))
    }

    /// `case subject { option pattern {..} ... default {..} }`
    fn case_expr(&mut self) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let subject = require!(self.logical());
        let open = self.cursor.current_span();
        if !self.cursor.eat(TokenKind::LBrace) {
            return ParseOutcome::consumed_err(self.expected("'{'"));
        }

        let mut arms = Vec::new();
        let mut default = None;
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat_keyword(Keyword::Option) {
                let pattern = require!(self.factor());
                let body = require!(self.block());
                arms.push(CaseArm { pattern, body });
            } else if self.cursor.check_keyword(Keyword::Default) {
                if default.is_some() {
                    return ParseOutcome::consumed_err(fck_diagnostic::unexpected_token(
                        self.cursor.current_span(),
                        "second 'default' in case",
                    ));
                }
                self.cursor.advance();
                default = Some(require!(self.block()));
            } else {
                break;
            }
        }
        commit!(self.expect_closer(TokenKind::RBrace, open, None));

        let arms = self.arena.alloc_case_arms(arms);
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(
            ExprKind::Case {
                subject,
                arms,
                default,
            },
            span,
        ))
    }

    // ─── Loops ───

    /// `@name iterate ...` or `@name while ...`
    fn labelled_loop(&mut self) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let label = commit!(self.cursor.expect_ident(ErrorKind::ExpectedLoopIdentifier));
        match self.cursor.current_kind() {
            TokenKind::Keyword(Keyword::Iterate) => self.iterate(Some(label), start),
            TokenKind::Keyword(Keyword::While) => self.while_loop(Some(label), start),
            _ => ParseOutcome::consumed_err(fck_diagnostic::unexpected_token(
                self.cursor.current_span(),
                &format!("{} after a loop label", self.cursor.describe_current()),
            )),
        }
    }

    /// `iterate [start to] end [step s] [:: name] {..}`
    fn iterate(&mut self, label: Option<Name>, start: Span) -> ParseOutcome<ExprId> {
        self.cursor.advance();
        let first = require!(self.arith());
        let (from, end) = if self.cursor.eat_keyword(Keyword::To) {
            (Some(first), require!(self.arith()))
        } else {
            (None, first)
        };
        let step = if self.cursor.eat_keyword(Keyword::Step) {
            Some(require!(self.arith()))
        } else {
            None
        };
        let binding = if self.cursor.eat(TokenKind::Set(AssignOp::Plain)) {
            Some(commit!(self.cursor.expect_ident(ErrorKind::ExpectedIdentifier)))
        } else {
            None
        };
        let body = require!(self.loop_body(label));

        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(
            ExprKind::Iterate {
                label,
                start: from,
                end,
                step,
                binding,
                body,
            },
            span,
        ))
    }

    /// `while cond {..}`
    fn while_loop(&mut self, label: Option<Name>, start: Span) -> ParseOutcome<ExprId> {
        self.cursor.advance();
        let cond = require!(self.logical());
        let body = require!(self.loop_body(label));
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::While { label, cond, body }, span))
    }

    /// A block with `label` pushed on the loop stack.
    fn loop_body(&mut self, label: Option<Name>) -> ParseOutcome<ExprId> {
        self.loops.push(label);
        let body = self.block();
        self.loops.pop();
        body
    }

    // ─── Functions ───

    /// `def [name](type param [:: default], ...) {..}`
    fn func_def(&mut self) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let name = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Some(name)
            }
            _ => None,
        };

        let open = self.cursor.current_span();
        if !self.cursor.eat(TokenKind::LParen) {
            return ParseOutcome::consumed_err(self.expected("'('"));
        }
        let mut params = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            params.push(require!(self.param()));
            self.cursor.skip_newlines();
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        commit!(self.expect_closer(TokenKind::RParen, open, None));

        // Loop labels do not reach into a function body.
        let enclosing = std::mem::take(&mut self.loops);
        let body = self.block();
        self.loops = enclosing;
        let body = require!(body);

        trace!(params = params.len(), "function literal");
        let params = self.arena.alloc_params(params);
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::FuncDef { name, params, body }, span))
    }

    /// `type name [:: default]`
    fn param(&mut self) -> ParseOutcome<Param> {
        let start = self.cursor.current_span();
        let ty = match self.cursor.current_kind() {
            TokenKind::Keyword(kw) => kw.var_type(),
            _ => None,
        };
        let Some(ty) = ty else {
            return ParseOutcome::empty_err(
                Diagnostic::error(ErrorKind::ExpectedType, start)
                    .with_arg(self.cursor.describe_current()),
            );
        };
        self.cursor.advance();
        let name = commit!(self.cursor.expect_ident(ErrorKind::ExpectedIdentifier));

        let default = match self.cursor.current_kind() {
            TokenKind::Set(AssignOp::Plain) => {
                self.cursor.advance();
                Some(require!(self.ternary()))
            }
            TokenKind::SetYield(AssignOp::Plain) => {
                let op_span = self.cursor.advance().span;
                self.warnings.push(
                    Diagnostic::warning(WarningKind::FuncArgRet, op_span)
                        .with_arg(self.name_str(name)),
                );
                Some(require!(self.ternary()))
            }
            _ => None,
        };

        ParseOutcome::consumed_ok(Param {
            name,
            ty,
            default,
            span: self.span_from(start),
        })
    }
}
