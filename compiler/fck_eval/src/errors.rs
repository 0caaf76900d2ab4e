//! Evaluation errors and control signals.
//!
//! `EvalError` travels the `Err` side of every evaluation step. It is either
//! a fatal diagnostic, which ends the current input, or a control signal
//! (`return`, `break`, `continue`, host exit) that an enclosing construct
//! consumes.
//!
//! The constructor functions below build the runtime diagnostics so every
//! fault of one kind is worded the same way.

use std::fmt;

use fck_diagnostic::{Diagnostic, ErrorKind};
use fck_ir::{BinaryOp, Name, Span, TypeKind};

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Non-local exit requested by the program.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// `return`, with the returned value.
    Return(Value),
    /// `break`, optionally naming the loop to leave.
    Break(Option<Name>),
    /// `continue`, optionally naming the loop to advance.
    Continue(Option<Name>),
    /// A host builtin asked the whole session to stop with this code.
    Exit(i32),
}

/// Error side of an evaluation step.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalError {
    Fatal(Diagnostic),
    Control(ControlAction),
}

impl From<Diagnostic> for EvalError {
    #[inline]
    fn from(diagnostic: Diagnostic) -> Self {
        EvalError::Fatal(diagnostic)
    }
}

impl From<ControlAction> for EvalError {
    #[inline]
    fn from(action: ControlAction) -> Self {
        EvalError::Control(action)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Fatal(diagnostic) => write!(f, "{diagnostic}"),
            EvalError::Control(action) => write!(f, "uncaught control signal {action:?}"),
        }
    }
}

/// A value as named in error messages: scalars with their value, other
/// kinds by type.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Str(_) => {
            format!("{} {value}", value.type_name())
        }
        Value::List(items) => format!("list of {} elements", items.len()),
        _ => value.type_name().to_string(),
    }
}

// ─── Operators ───

/// `op` has no meaning for this combination of operands.
pub fn illegal_operation(span: Span, op: impl fmt::Display, operands: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::IllegalOperation, span)
        .with_arg(op)
        .with_arg(operands)
}

pub fn binary_type_mismatch(span: Span, op: BinaryOp, left: &Value, right: &Value) -> Diagnostic {
    illegal_operation(
        span,
        op,
        &format!("{} and {}", left.type_name(), right.type_name()),
    )
}

pub fn number_overflow(span: Span, op: impl fmt::Display) -> Diagnostic {
    Diagnostic::error(ErrorKind::NumberOverflow, span).with_arg(op)
}

// ─── Values and conversions ───

pub fn illegal_value(span: Span, message: impl fmt::Display) -> Diagnostic {
    Diagnostic::error(ErrorKind::IllegalValue, span).with_arg(message)
}

pub fn illegal_value_type(span: Span, value: &Value, usage: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::IllegalValueType, span)
        .with_arg(value.type_name())
        .with_arg(usage)
}

pub fn illegal_cast(span: Span, value: &Value, target: TypeKind) -> Diagnostic {
    Diagnostic::error(ErrorKind::IllegalCastType, span)
        .with_arg(describe(value))
        .with_arg(target)
}

pub fn illegal_variable_value(span: Span, value: &Value, kind: TypeKind, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::IllegalVariableValue, span)
        .with_arg(value.type_name())
        .with_arg(kind)
        .with_arg(name)
}

pub fn invalid_iterable(span: Span, value: &Value) -> Diagnostic {
    Diagnostic::error(ErrorKind::InvalidIterable, span).with_arg(value.type_name())
}

pub fn unknown_attribute(span: Span, owner: &str, attr: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::UnknownAttribute, span)
        .with_arg(owner)
        .with_arg(attr)
}

// ─── Calls ───

pub fn not_callable(span: Span, value: &Value) -> Diagnostic {
    Diagnostic::error(ErrorKind::NotCallable, span).with_arg(value.type_name())
}

/// Wrong number of arguments, or one argument given twice.
pub fn wrong_arguments(span: Span, function: &str, problem: impl fmt::Display) -> Diagnostic {
    Diagnostic::error(ErrorKind::TooArgument, span)
        .with_arg(format_args!("'{function}'"))
        .with_arg(problem)
}

pub fn argument_type(
    span: Span,
    param: &str,
    function: &str,
    expected: TypeKind,
    got: &Value,
) -> Diagnostic {
    Diagnostic::error(ErrorKind::ArgumentType, span)
        .with_arg(param)
        .with_arg(format_args!("'{function}'"))
        .with_arg(expected)
        .with_arg(got.type_name())
}

pub fn illegal_argument_value(
    span: Span,
    param: &str,
    function: &str,
    problem: impl fmt::Display,
) -> Diagnostic {
    Diagnostic::error(ErrorKind::IllegalArgumentValue, span)
        .with_arg(param)
        .with_arg(format_args!("'{function}'"))
        .with_arg(problem)
}

pub fn return_outside_function(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorKind::ReturnOutsideFunction, span)
}

#[cfg(test)]
mod tests;
