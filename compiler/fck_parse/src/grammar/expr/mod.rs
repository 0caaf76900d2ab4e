//! Expression parsing.
//!
//! Precedence, loosest first:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | ternary | `? :` | right |
//! | logical | `and` `or` | left |
//! | not | `not` | prefix |
//! | comparison | `==` `!=` `<` `<=` `>` `>=` | left |
//! | arith | `+` `-` | left |
//! | term | `*` `/` `//` `%` | left |
//! | factor | unary `+` `-` `!` | prefix |
//! | power | `**` | right |
//! | postfix | call, index, `.attr`, `as type` | left |
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point, bindings and the binary precedence chain
//! - `operators.rs`: token to operator matching
//! - `postfix.rs`: calls, indexing, attributes, casts
//! - `primary.rs`: literals, groups, conditionals, loops, function literals

mod operators;
mod postfix;
mod primary;

use fck_diagnostic::{Diagnostic, ErrorKind};
use fck_ir::{
    AssignOp, BinaryOp, ExprId, ExprKind, Keyword, Name, TokenKind, TypeKind, UnaryOp, VarType,
};
use fck_stack::ensure_sufficient_stack;

use crate::{ParseOutcome, Parser};

impl Parser<'_> {
    /// Parse one expression, including declarations and assignments.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot overflow
    /// the native stack.
    pub(crate) fn expr(&mut self) -> ParseOutcome<ExprId> {
        ensure_sufficient_stack(|| self.expr_inner())
    }

    fn expr_inner(&mut self) -> ParseOutcome<ExprId> {
        match self.cursor.current_kind() {
            TokenKind::Keyword(kw) => match kw.var_type() {
                Some(ty) => self.declaration(ty),
                None => self.ternary(),
            },
            TokenKind::Ident(name)
                if matches!(
                    self.cursor.peek_kind(),
                    TokenKind::Set(_) | TokenKind::SetYield(_)
                ) =>
            {
                self.reassignment(name)
            }
            _ => self.ternary(),
        }
    }

    // ─── Bindings ───

    /// `type name [:: value]` or `type name :> value`.
    fn declaration(&mut self, ty: VarType) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let name = commit!(self.cursor.expect_ident(ErrorKind::ExpectedIdentifier));

        let (value, yields) = match self.cursor.current_kind() {
            TokenKind::Set(AssignOp::Plain) => {
                self.cursor.advance();
                (Some(require!(self.expr())), false)
            }
            TokenKind::SetYield(AssignOp::Plain) => {
                self.cursor.advance();
                (Some(require!(self.expr())), true)
            }
            TokenKind::Set(_) | TokenKind::SetYield(_) => {
                return ParseOutcome::consumed_err(self.assignment_operator_error());
            }
            _ if ty == VarType::Auto => {
                return ParseOutcome::consumed_err(self.expected_expression());
            }
            _ => (None, false),
        };

        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(
            ExprKind::VarDecl {
                ty,
                name,
                value,
                yields,
            },
            span,
        ))
    }

    /// `name <op> value` for every assignment-family operator.
    fn reassignment(&mut self, name: Name) -> ParseOutcome<ExprId> {
        let start = self.cursor.advance().span;
        let (op, yields) = match self.cursor.current_kind() {
            TokenKind::Set(op) => (op, false),
            TokenKind::SetYield(op) => (op, true),
            _ => return ParseOutcome::consumed_err(self.assignment_operator_error()),
        };
        self.cursor.advance();
        let value = require!(self.expr());
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(
            ExprKind::Reassign {
                name,
                op,
                value,
                yields,
            },
            span,
        ))
    }

    fn assignment_operator_error(&self) -> Diagnostic {
        Diagnostic::error(ErrorKind::ExpectedAssignmentOperator, self.cursor.current_span())
            .with_arg(self.cursor.describe_current())
    }

    // ─── Conditional expression ───

    /// `cond ? then : else`, where either branch may be omitted.
    ///
    /// Leaving out `then` is only allowed after an explicit `as bool` cast,
    /// where the result is the condition itself.
    pub(crate) fn ternary(&mut self) -> ParseOutcome<ExprId> {
        let cond = chain!(self.logical());
        if !self.cursor.eat(TokenKind::Question) {
            return ParseOutcome::consumed_ok(cond);
        }

        let then_branch = if self.cursor.check(TokenKind::Colon) {
            if !self.is_bool_cast(cond) {
                return ParseOutcome::consumed_err(self.expected_expression());
            }
            None
        } else {
            Some(require!(self.ternary()))
        };

        let else_branch = if self.cursor.eat(TokenKind::Colon) {
            if then_branch.is_some() && self.cursor.at_boundary() {
                None
            } else {
                Some(require!(self.ternary()))
            }
        } else if self.cursor.at_boundary() {
            None
        } else {
            return ParseOutcome::consumed_err(self.expected("':'"));
        };

        let span = self.span_from(self.span_of(cond));
        ParseOutcome::consumed_ok(self.alloc(
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    fn is_bool_cast(&self, id: ExprId) -> bool {
        matches!(
            self.arena.get_expr(id).kind,
            ExprKind::Cast {
                ty: TypeKind::Bool,
                ..
            }
        )
    }

    // ─── Binary precedence chain ───

    /// One left-associative binary level.
    fn binary_level(
        &mut self,
        operand: fn(&mut Self) -> ParseOutcome<ExprId>,
        match_op: fn(TokenKind) -> Option<BinaryOp>,
    ) -> ParseOutcome<ExprId> {
        let mut left = chain!(operand(self));
        while let Some(op) = match_op(self.cursor.current_kind()) {
            self.cursor.advance();
            let right = require!(operand(self));
            left = self.binary(op, left, right);
        }
        ParseOutcome::consumed_ok(left)
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        self.alloc(ExprKind::Binary { op, left, right }, span)
    }

    /// `and` / `or`, equal precedence.
    pub(crate) fn logical(&mut self) -> ParseOutcome<ExprId> {
        self.binary_level(Self::not_expr, operators::logical_op)
    }

    fn not_expr(&mut self) -> ParseOutcome<ExprId> {
        if self.cursor.check_keyword(Keyword::Not) {
            let start = self.cursor.advance().span;
            let operand = require!(self.not_expr());
            let span = self.span_from(start);
            return ParseOutcome::consumed_ok(self.alloc(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand,
                },
                span,
            ));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> ParseOutcome<ExprId> {
        self.binary_level(Self::arith, operators::comparison_op)
    }

    /// `+` / `-`. Loop bounds are parsed at this level.
    pub(crate) fn arith(&mut self) -> ParseOutcome<ExprId> {
        self.binary_level(Self::term, operators::additive_op)
    }

    fn term(&mut self) -> ParseOutcome<ExprId> {
        self.binary_level(Self::factor, operators::multiplicative_op)
    }

    /// Prefix `+`, `-`, `!`, then `**`. Case patterns are parsed here.
    pub(crate) fn factor(&mut self) -> ParseOutcome<ExprId> {
        let Some(op) = operators::prefix_op(self.cursor.current_kind()) else {
            return self.power();
        };
        let start = self.cursor.advance().span;
        let operand = require!(ensure_sufficient_stack(|| self.factor()));
        let span = self.span_from(start);
        ParseOutcome::consumed_ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    /// `base ** exponent`, right-associative through `factor`.
    fn power(&mut self) -> ParseOutcome<ExprId> {
        let base = chain!(self.postfix());
        if !self.cursor.eat(TokenKind::StarStar) {
            return ParseOutcome::consumed_ok(base);
        }
        let exponent = require!(self.factor());
        ParseOutcome::consumed_ok(self.binary(BinaryOp::Pow, base, exponent))
    }
}
