//! Tree-walking interpreter.
//!
//! `eval` is one exhaustive match over `ExprKind`. Handlers for the larger
//! constructs live in submodules:
//!
//! - `call`: function and builtin calls, argument reconciliation
//! - `loops`: `iterate` and `while`
//! - `access`: indexing and attributes
//! - `scope_guard`: RAII scope switching
//!
//! The interpreter owns everything it touches through reference-counted
//! handles, so functions defined by one program stay callable from later
//! programs of the same session.

mod access;
mod builder;
mod call;
mod loops;
mod scope_guard;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use call::CallContext;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use fck_diagnostic::{unknown_identifier, Diagnostic, WarningSink};
use fck_ir::{
    BinaryOp, ExprId, ExprKind, ExprRange, Name, SharedArena, SharedInterner, SourceFile, Span,
    StringInterner, VarType,
};
use fck_stack::ensure_sufficient_stack;

use crate::call_stack::CallStack;
use crate::errors::{return_outside_function, ControlAction, EvalError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary, Operand};
use crate::print_handler::SharedPrintHandler;
use crate::value::{coerce_for_assignment, zero_value, BuiltinValue, FunctionValue};
use crate::{AssignError, LocalScope, Scope, Value};

use loops::IterateLoop;

/// The evaluator and its state between programs.
pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    /// Arena of the code currently running.
    pub(crate) arena: SharedArena,
    /// Source of the code currently running.
    pub(crate) source: Rc<SourceFile>,
    /// Innermost scope.
    pub(crate) env: LocalScope<Scope>,
    /// Root scope: constants, builtins and top-level variables.
    pub(crate) globals: LocalScope<Scope>,
    pub(crate) sink: Rc<dyn WarningSink>,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: CallStack,
    /// Number of user function bodies currently running; `return` is only
    /// legal when this is non-zero.
    pub(crate) function_depth: usize,
}

/// Forwards warnings to the session sink with the running source attached.
struct SourcedSink<'a> {
    inner: &'a dyn WarningSink,
    source: &'a Rc<SourceFile>,
}

impl WarningSink for SourcedSink<'_> {
    fn warn(&self, diagnostic: Diagnostic) {
        self.inner.warn(diagnostic.with_source(self.source));
    }
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// The root scope.
    #[inline]
    pub fn globals(&self) -> &LocalScope<Scope> {
        &self.globals
    }

    /// Look up a name as the running code would see it.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let name = self.interner.intern(name);
        self.env.borrow().get(name).map(|(value, _)| value)
    }

    /// Install a builtin as a root constant.
    pub fn register_builtin(&mut self, builtin: BuiltinValue) {
        let name = self.interner.intern(builtin.name);
        tracing::debug!(builtin = builtin.name, "registering builtin");
        self.globals
            .borrow_mut()
            .set_constant(name, Value::Builtin(Rc::new(builtin)));
    }

    /// Evaluate a parsed program in the root scope.
    ///
    /// Top-level statements run directly in the root scope, so variables
    /// they declare outlive the program. Interpreter state is restored
    /// afterwards, which lets a builtin run a nested program mid-call.
    #[tracing::instrument(level = "debug", skip_all, fields(source = source.name()))]
    pub fn eval_program(
        &mut self,
        arena: SharedArena,
        root: ExprId,
        source: Rc<SourceFile>,
    ) -> EvalResult {
        let saved_arena = std::mem::replace(&mut self.arena, arena);
        let saved_source = std::mem::replace(&mut self.source, source);
        let saved_depth = std::mem::replace(&mut self.function_depth, 0);

        let statements = match self.arena.get_expr(root).kind {
            ExprKind::Block(range) => Some(range),
            _ => None,
        };
        let result = {
            let globals = self.globals.clone();
            let mut scoped = self.scoped_in(globals);
            match statements {
                Some(range) => scoped.eval_statements(range),
                None => scoped.eval(root),
            }
        };

        let result = match result {
            Err(EvalError::Fatal(diagnostic)) => {
                Err(EvalError::Fatal(diagnostic.with_source(&self.source)))
            }
            // A stray break or continue has no loop left to stop.
            Err(EvalError::Control(ControlAction::Break(_) | ControlAction::Continue(_))) => {
                Ok(Value::Null)
            }
            other => other,
        };

        self.arena = saved_arena;
        self.source = saved_source;
        self.function_depth = saved_depth;
        result
    }

    /// Evaluate one expression.
    pub fn eval(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&mut self, id: ExprId) -> EvalResult {
        let arena = self.arena.clone();
        let expr = arena.get_expr(id);
        let span = expr.span;

        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(f) => Ok(Value::Float(*f)),
            ExprKind::Str(name) => Ok(Value::string(self.interner.lookup(*name))),
            ExprKind::List(range) => {
                let items = arena
                    .get_expr_list(*range)
                    .iter()
                    .map(|&item| self.eval(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(items))
            }
            ExprKind::Ident(name) => self.eval_ident(*name, span),

            ExprKind::Index { target, specs } => self.eval_index(*target, *specs),
            ExprKind::Attribute { target, attr } => self.eval_attribute(*target, *attr, span),
            ExprKind::Cast { expr, ty } => Ok(self.eval(*expr)?.as_type(*ty, span)?),

            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(*operand)?;
                Ok(evaluate_unary(*op, Operand::new(&value, span))?)
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval(*cond)?;
                if cond.is_true() {
                    then_branch.map_or(Ok(cond), |then| self.eval(then))
                } else {
                    else_branch.map_or(Ok(Value::Null), |other| self.eval(other))
                }
            }

            ExprKind::VarDecl {
                ty,
                name,
                value,
                yields,
            } => self.eval_var_decl(*ty, *name, *value, *yields, span),
            ExprKind::Reassign {
                name,
                op,
                value,
                yields,
            } => {
                let rhs = self.eval(*value)?;
                let value_span = arena.get_expr(*value).span;
                let assigned = self.reassign(*name, op.as_binary(), rhs, span, value_span)?;
                Ok(if *yields { assigned } else { Value::Null })
            }

            ExprKind::If {
                branches,
                else_branch,
            } => {
                for branch in arena.get_if_branches(*branches) {
                    if self.eval(branch.cond)?.is_true() {
                        return self.eval_in_place(branch.body);
                    }
                }
                else_branch.map_or(Ok(Value::Null), |body| self.eval_in_place(body))
            }
            ExprKind::Case {
                subject,
                arms,
                default,
            } => {
                let subject = self.eval(*subject)?;
                for arm in arena.get_case_arms(*arms) {
                    if subject.equals(&self.eval(arm.pattern)?) {
                        return self.eval_in_place(arm.body);
                    }
                }
                default.map_or(Ok(Value::Null), |body| self.eval_in_place(body))
            }

            ExprKind::Iterate {
                label,
                start,
                end,
                step,
                binding,
                body,
            } => self.eval_iterate(
                IterateLoop {
                    label: *label,
                    start: *start,
                    end: *end,
                    step: *step,
                    binding: *binding,
                    body: *body,
                },
                span,
            ),
            ExprKind::While { label, cond, body } => self.eval_while(*label, *cond, *body),

            ExprKind::FuncDef { name, params, body } => {
                let function = Value::Function(Rc::new(FunctionValue {
                    name: *name,
                    display: name.map_or("<anonymous>", |n| self.interner.lookup(n)),
                    params: arena.get_params(*params).to_vec(),
                    body: *body,
                    arena: self.arena.clone(),
                    source: Rc::clone(&self.source),
                    closure: self.env.clone(),
                }));
                if let Some(name) = name {
                    self.env
                        .borrow_mut()
                        .set(*name, function.clone(), VarType::Auto);
                }
                Ok(function)
            }
            ExprKind::Call { callee, args } => self.eval_call(*callee, *args, span),

            ExprKind::Return { value, guard } => {
                if !self.guard_passes(*guard)? {
                    return Ok(Value::Null);
                }
                if self.function_depth == 0 {
                    return Err(return_outside_function(span).into());
                }
                let value = match value {
                    Some(value) => self.eval(*value)?,
                    None => Value::Null,
                };
                Err(ControlAction::Return(value).into())
            }
            ExprKind::Break { label, guard } => {
                if !self.guard_passes(*guard)? {
                    return Ok(Value::Null);
                }
                Err(ControlAction::Break(*label).into())
            }
            ExprKind::Continue { label, guard } => {
                if !self.guard_passes(*guard)? {
                    return Ok(Value::Null);
                }
                Err(ControlAction::Continue(*label).into())
            }

            ExprKind::Block(range) => {
                let range = *range;
                self.with_env_scope(|scoped| scoped.eval_statements(range))
            }
        }
    }

    /// Evaluate a branch body without opening a scope, so declarations in
    /// `if` and `case` branches stay visible after the branch.
    fn eval_in_place(&mut self, body: ExprId) -> EvalResult {
        let statements = match self.arena.get_expr(body).kind {
            ExprKind::Block(range) => Some(range),
            _ => None,
        };
        match statements {
            Some(range) => ensure_sufficient_stack(|| self.eval_statements(range)),
            None => self.eval(body),
        }
    }

    /// Run statements in the current scope; the last one's value is the
    /// result.
    fn eval_statements(&mut self, range: ExprRange) -> EvalResult {
        let arena = self.arena.clone();
        let mut last = Value::Null;
        for &statement in arena.get_expr_list(range) {
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    fn eval_ident(&self, name: Name, span: Span) -> EvalResult {
        match self.env.borrow().get(name) {
            Some((value, _)) => Ok(value),
            None => Err(unknown_identifier(span, self.interner.lookup(name)).into()),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        let left_span = self.arena.get_expr(left).span;
        let right_span = self.arena.get_expr(right).span;
        let lhs = self.eval(left)?;

        match op {
            BinaryOp::And if !lhs.is_true() => return Ok(Value::Bool(false)),
            BinaryOp::Or if lhs.is_true() => return Ok(Value::Bool(true)),
            BinaryOp::And | BinaryOp::Or => return Ok(Value::Bool(self.eval(right)?.is_true())),
            _ => {}
        }

        let rhs = self.eval(right)?;
        Ok(evaluate_binary(
            op,
            Operand::new(&lhs, left_span),
            Operand::new(&rhs, right_span),
            &self.warnings(),
        )?)
    }

    fn eval_var_decl(
        &mut self,
        ty: VarType,
        name: Name,
        value: Option<ExprId>,
        yields: bool,
        span: Span,
    ) -> EvalResult {
        let value = match (value, ty) {
            (Some(value), _) => self.eval(value)?,
            (None, VarType::Typed(kind)) => zero_value(kind),
            (None, VarType::Auto) => Value::Null,
        };
        let value =
            coerce_for_assignment(value, ty, self.interner.lookup(name), span, &self.warnings())?;
        self.env.borrow_mut().set(name, value.clone(), ty);
        Ok(if yields { value } else { Value::Null })
    }

    /// Store into an existing variable, applying a compound operator first
    /// when there is one. Returns the stored value.
    fn reassign(
        &mut self,
        name: Name,
        op: Option<BinaryOp>,
        rhs: Value,
        span: Span,
        value_span: Span,
    ) -> Result<Value, Diagnostic> {
        let text = self.interner.lookup(name);
        let Some((current, is_constant)) = self.env.borrow().get(name) else {
            return Err(unknown_identifier(span, text));
        };
        if is_constant {
            return Ok(current);
        }

        let sink = self.warnings();
        let updated = match op {
            Some(op) => evaluate_binary(
                op,
                Operand::new(&current, span),
                Operand::new(&rhs, value_span),
                &sink,
            )?,
            None => rhs,
        };
        let ty = self.env.borrow().var_type(name).unwrap_or(VarType::Auto);
        let updated = coerce_for_assignment(updated, ty, text, span, &sink)?;

        let assigned = self.env.borrow_mut().assign(name, updated.clone());
        match assigned {
            Ok(()) => Ok(updated),
            Err(AssignError::Constant(value)) => Ok(value),
            Err(AssignError::Undefined) => Err(unknown_identifier(span, text)),
        }
    }

    /// `true` when there is no guard or the guard holds.
    fn guard_passes(&mut self, guard: Option<ExprId>) -> Result<bool, EvalError> {
        match guard {
            Some(guard) => Ok(self.eval(guard)?.is_true()),
            None => Ok(true),
        }
    }

    /// Warning sink that tags each warning with the running source.
    fn warnings(&self) -> SourcedSink<'_> {
        SourcedSink {
            inner: &*self.sink,
            source: &self.source,
        }
    }

    pub(crate) fn warn(&self, diagnostic: Diagnostic) {
        self.warnings().warn(diagnostic);
    }
}
