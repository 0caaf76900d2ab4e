//! Function and builtin calls.
//!
//! A call goes through four steps:
//!
//! 1. evaluate the callee and the arguments in the caller's scope
//! 2. reconcile arguments with parameters (`bind_arguments`)
//! 3. cast each argument to its declared type, falling back to the default
//! 4. run the body in a child of the closure scope, or the native function
//!
//! Argument faults are reported in the caller's source. Faults inside the
//! body get the call stack attached as a traceback.

use std::rc::Rc;

use fck_diagnostic::{Diagnostic, WarningKind, WarningSink};
use fck_ir::{CallArgRange, ExprId, SharedArena, SourceFile, Span, StringInterner, VarType};

use super::Interpreter;
use crate::call_stack::CallFrame;
use crate::errors::{
    argument_type, not_callable, unknown_attribute, wrong_arguments, ControlAction, EvalError,
    EvalResult,
};
use crate::print_handler::SharedPrintHandler;
use crate::value::{BuiltinValue, FunctionValue};
use crate::{LocalScope, Scope, Value};

/// An evaluated call argument.
struct ArgValue {
    name: Option<&'static str>,
    value: Value,
    span: Span,
}

/// What reconciliation needs to know about a parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
struct ParamShape {
    name: &'static str,
    has_default: bool,
}

/// Assign arguments to parameter slots.
///
/// Named arguments claim their slot first. Positional arguments then fill
/// the free slots left to right: every free slot without a default, plus as
/// many of the leftmost free slots with a default as there are spare
/// positional arguments. A `None` slot falls back to its default.
fn bind_arguments(
    function: &str,
    params: &[ParamShape],
    args: Vec<ArgValue>,
    call_span: Span,
) -> Result<Vec<Option<ArgValue>>, Diagnostic> {
    let total = args.len();
    let mut slots: Vec<Option<ArgValue>> = params.iter().map(|_| None).collect();
    let mut positional = Vec::new();

    for arg in args {
        let Some(name) = arg.name else {
            positional.push(arg);
            continue;
        };
        let Some(index) = params.iter().position(|p| p.name == name) else {
            return Err(unknown_attribute(
                arg.span,
                &format!("function '{function}'"),
                name,
            ));
        };
        if slots[index].is_some() {
            return Err(wrong_arguments(
                arg.span,
                function,
                format_args!("argument '{name}' given more than once"),
            ));
        }
        slots[index] = Some(arg);
    }

    let free: Vec<usize> = (0..params.len()).filter(|&i| slots[i].is_none()).collect();
    if positional.len() > free.len() {
        return Err(wrong_arguments(
            call_span,
            function,
            format_args!("expected at most {} arguments, got {total}", params.len()),
        ));
    }

    let required = free.iter().filter(|&&i| !params[i].has_default).count();
    let mut spare = positional.len().saturating_sub(required);
    let chosen = free.into_iter().filter(|&i| {
        if !params[i].has_default {
            return true;
        }
        if spare > 0 {
            spare -= 1;
            return true;
        }
        false
    });
    for (index, arg) in chosen.zip(positional) {
        slots[index] = Some(arg);
    }

    if let Some(missing) = params
        .iter()
        .zip(&slots)
        .find(|(param, slot)| slot.is_none() && !param.has_default)
    {
        return Err(wrong_arguments(
            call_span,
            function,
            format_args!("missing argument '{}'", missing.0.name),
        ));
    }
    Ok(slots)
}

/// Handle given to native functions.
pub struct CallContext<'i> {
    interpreter: &'i mut Interpreter,
    span: Span,
}

impl CallContext<'_> {
    /// Span of the call expression.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        self.interpreter.interner()
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.interpreter.print_handler()
    }

    /// The session's warning sink, without source attribution.
    pub fn warning_sink(&self) -> Rc<dyn WarningSink> {
        Rc::clone(&self.interpreter.sink)
    }

    /// Emit a warning located in the calling code.
    pub fn warn(&self, diagnostic: Diagnostic) {
        self.interpreter.warn(diagnostic);
    }

    /// Run another program in the root scope, as the `run` builtin does.
    pub fn eval_program(
        &mut self,
        arena: SharedArena,
        root: ExprId,
        source: Rc<SourceFile>,
    ) -> EvalResult {
        self.interpreter.eval_program(arena, root, source)
    }
}

impl Interpreter {
    pub(super) fn eval_call(
        &mut self,
        callee: ExprId,
        args: CallArgRange,
        span: Span,
    ) -> EvalResult {
        let callee_span = self.arena.get_expr(callee).span;
        let callee = self.eval(callee)?;
        if !matches!(callee, Value::Function(_) | Value::Builtin(_)) {
            return Err(not_callable(callee_span, &callee).into());
        }

        let arena = self.arena.clone();
        let mut evaluated = Vec::new();
        for arg in arena.get_call_args(args) {
            evaluated.push(ArgValue {
                name: arg.name.map(|n| self.interner.lookup(n)),
                value: self.eval(arg.value)?,
                span: arg.span,
            });
        }

        match &callee {
            Value::Function(function) => self.call_function(function, evaluated, span),
            Value::Builtin(builtin) => self.call_builtin(builtin, evaluated, span),
            _ => Err(not_callable(callee_span, &callee).into()),
        }
    }

    /// Cast an argument to its parameter's type.
    ///
    /// `Ok(None)` means the cast failed and the parameter's default takes
    /// over; that is only returned when a default exists.
    fn cast_argument(
        &self,
        function: &str,
        param: ParamShape,
        ty: VarType,
        arg: ArgValue,
    ) -> Result<Option<Value>, Diagnostic> {
        let VarType::Typed(kind) = ty else {
            return Ok(Some(arg.value));
        };
        match arg.value.as_type(kind, arg.span) {
            Ok(value) => Ok(Some(value)),
            Err(_) if param.has_default => {
                self.warn(
                    Diagnostic::warning(WarningKind::ArgCastError, arg.span)
                        .with_arg(param.name)
                        .with_arg(kind),
                );
                Ok(None)
            }
            Err(_) => Err(argument_type(
                arg.span,
                param.name,
                function,
                kind,
                &arg.value,
            )),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(function = function.display_name()))]
    fn call_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: Vec<ArgValue>,
        span: Span,
    ) -> EvalResult {
        let display = function.display_name();
        let shapes: Vec<ParamShape> = function
            .params
            .iter()
            .map(|p| ParamShape {
                name: self.interner.lookup(p.name),
                has_default: p.default.is_some(),
            })
            .collect();

        let slots = bind_arguments(display, &shapes, args, span)?;
        let mut values = Vec::with_capacity(slots.len());
        for ((shape, param), slot) in shapes.iter().zip(&function.params).zip(slots) {
            values.push(match slot {
                Some(arg) => self.cast_argument(display, *shape, param.ty, arg)?,
                None => None,
            });
        }

        self.call_stack.push(CallFrame {
            name: display,
            call_span: span,
        })?;

        let saved_arena = std::mem::replace(&mut self.arena, function.arena.clone());
        let saved_source = std::mem::replace(&mut self.source, Rc::clone(&function.source));
        self.function_depth += 1;

        let result = {
            let call_scope = LocalScope::new(Scope::with_parent(function.closure.clone()));
            let mut scoped = self.scoped_in(call_scope);
            scoped
                .bind_parameters(function, values)
                .and_then(|()| scoped.eval(function.body))
        };

        self.function_depth -= 1;
        self.arena = saved_arena;
        self.source = saved_source;

        let result = match result {
            Ok(value) | Err(EvalError::Control(ControlAction::Return(value))) => Ok(value),
            Err(EvalError::Fatal(diagnostic)) => Err(EvalError::Fatal(
                self.call_stack
                    .attach(diagnostic)
                    .with_source(&function.source),
            )),
            Err(other) => Err(other),
        };
        self.call_stack.pop();
        result
    }

    /// Define parameters in the call scope. `None` values take the
    /// parameter's default, evaluated in the call scope.
    fn bind_parameters(
        &mut self,
        function: &FunctionValue,
        values: Vec<Option<Value>>,
    ) -> Result<(), EvalError> {
        for (param, value) in function.params.iter().zip(values) {
            let value = match (value, param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => {
                    let value = self.eval(default)?;
                    match param.ty {
                        VarType::Typed(kind) => {
                            value.as_type(kind, self.arena.get_expr(default).span)?
                        }
                        VarType::Auto => value,
                    }
                }
                (None, None) => Value::Null,
            };
            self.env.borrow_mut().set(param.name, value, param.ty);
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all, fields(builtin = builtin.name))]
    fn call_builtin(
        &mut self,
        builtin: &Rc<BuiltinValue>,
        args: Vec<ArgValue>,
        span: Span,
    ) -> EvalResult {
        let shapes: Vec<ParamShape> = builtin
            .params
            .iter()
            .map(|p| ParamShape {
                name: p.name,
                has_default: p.default.is_some(),
            })
            .collect();

        let slots = bind_arguments(builtin.name, &shapes, args, span)?;
        let mut values = Vec::with_capacity(slots.len());
        for ((shape, param), slot) in shapes.iter().zip(&builtin.params).zip(slots) {
            let value = match slot {
                Some(arg) => self.cast_argument(builtin.name, *shape, param.ty, arg)?,
                None => None,
            };
            values.push(value.or_else(|| param.default.clone()).unwrap_or_default());
        }

        self.call_stack.push(CallFrame {
            name: builtin.name,
            call_span: span,
        })?;
        let result = {
            let mut context = CallContext {
                interpreter: self,
                span,
            };
            (builtin.native)(&mut context, &values)
        };
        let result = match result {
            Err(EvalError::Fatal(diagnostic)) => {
                Err(EvalError::Fatal(self.call_stack.attach(diagnostic)))
            }
            other => other,
        };
        self.call_stack.pop();
        result
    }
}
