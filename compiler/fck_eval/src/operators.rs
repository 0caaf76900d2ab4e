//! Binary and unary operator dispatch.
//!
//! Dispatch is a match on the left operand's variant and then the right
//! one's. Combinations without a rule are `IllegalOperation` spanning both
//! operands. Numeric faults that have a sensible substitute (division by
//! zero, modulo by zero, dividing infinities) warn and carry on.

use std::cmp::Ordering;

use fck_diagnostic::{Diagnostic, WarningKind, WarningSink};
use fck_ir::{BinaryOp, Span, UnaryOp};

use crate::errors::{binary_type_mismatch, illegal_operation, illegal_value, number_overflow};
use crate::value::{float_to_int, Dividend, Number};
use crate::Value;

/// Longest string a repetition may build, in bytes.
const MAX_REPEAT_LEN: usize = 1 << 28;

/// An operand paired with the span it was evaluated from.
#[derive(Copy, Clone, Debug)]
pub struct Operand<'v> {
    pub value: &'v Value,
    pub span: Span,
}

impl<'v> Operand<'v> {
    #[inline]
    pub fn new(value: &'v Value, span: Span) -> Self {
        Operand { value, span }
    }
}

/// Apply a binary operator.
///
/// `and`/`or` here evaluate both sides; the interpreter short-circuits
/// before reaching this point.
pub fn evaluate_binary(
    op: BinaryOp,
    left: Operand<'_>,
    right: Operand<'_>,
    sink: &dyn WarningSink,
) -> Result<Value, Diagnostic> {
    let span = left.span.merge(right.span);
    match op {
        BinaryOp::And => Ok(Value::Bool(left.value.is_true() && right.value.is_true())),
        BinaryOp::Or => Ok(Value::Bool(left.value.is_true() || right.value.is_true())),
        BinaryOp::Eq => Ok(Value::Bool(left.value.equals(right.value))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.value.equals(right.value))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            compare(op, left.value, right.value, span)
        }
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::FloorDiv
        | BinaryOp::Mod
        | BinaryOp::Pow => arithmetic(op, left, right, sink),
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value, Diagnostic> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match (left.as_number(), right.as_number()) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => Some(a.cmp(&b)),
            (Some(a), Some(b)) => a.to_f64().partial_cmp(&b.to_f64()),
            _ => return Err(binary_type_mismatch(span, op, left, right)),
        },
    };
    // NaN compares false both ways.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

fn arithmetic(
    op: BinaryOp,
    left: Operand<'_>,
    right: Operand<'_>,
    sink: &dyn WarningSink,
) -> Result<Value, Diagnostic> {
    let span = left.span.merge(right.span);
    match (left.value, right.value) {
        (Value::Null, Value::Str(s)) if op == BinaryOp::Add => {
            Ok(Value::string(format!("null{s}")))
        }
        (Value::Null, other) if op == BinaryOp::Add => Ok(other.clone()),
        (
            Value::Str(s),
            other @ (Value::Str(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Bool(_)
            | Value::Null),
        ) if op == BinaryOp::Add => Ok(Value::string(format!("{s}{}", other.display_value()))),
        (Value::Str(s), other) if op == BinaryOp::Mul && other.as_number().is_some() => {
            let count = repeat_count(other, right.span, sink, false)?;
            repeat(s, count, span)
        }
        (other, Value::Str(s)) if op == BinaryOp::Mul && other.as_number().is_some() => {
            let count = repeat_count(other, left.span, sink, true)?;
            repeat(s, count, span)
        }
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            Ok(Value::list(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::List(items), scalar) if scalar.as_number().is_some() => items
            .iter()
            .map(|item| evaluate_binary(op, Operand::new(item, left.span), right, sink))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list),
        (Value::Infinity(dividend), _) => infinity_left(op, *dividend, left, right, sink),
        (_, Value::Infinity(dividend)) => infinity_right(op, *dividend, left, right, sink),
        _ => match (Dividend::of(left.value), right.value.as_number()) {
            (Some(a), Some(b)) => numeric(op, a, b, span, sink),
            _ => Err(binary_type_mismatch(span, op, left.value, right.value)),
        },
    }
}

/// `Infinity <op> value`.
fn infinity_left(
    op: BinaryOp,
    dividend: Dividend,
    left: Operand<'_>,
    right: Operand<'_>,
    sink: &dyn WarningSink,
) -> Result<Value, Diagnostic> {
    let span = left.span.merge(right.span);
    match (op, right.value) {
        (BinaryOp::Div | BinaryOp::FloorDiv, Value::Infinity(_)) => {
            sink.warn(Diagnostic::warning(WarningKind::InfinityDivInfinity, span));
            Ok(Value::Int(0))
        }
        (BinaryOp::Div | BinaryOp::FloorDiv, value) if value.as_number().is_some() => {
            sink.warn(
                Diagnostic::warning(WarningKind::InfinityDivValue, span)
                    .with_arg(value.display_value()),
            );
            Ok(Value::Infinity(dividend))
        }
        (BinaryOp::Mul, value) => match value.as_number() {
            Some(n) if n.is_zero() => Ok(Value::from(dividend)),
            Some(_) => Ok(Value::Infinity(dividend)),
            None => Err(binary_type_mismatch(span, op, left.value, right.value)),
        },
        _ => Err(binary_type_mismatch(span, op, left.value, right.value)),
    }
}

/// `value <op> Infinity`, for a non-infinite left operand.
fn infinity_right(
    op: BinaryOp,
    dividend: Dividend,
    left: Operand<'_>,
    right: Operand<'_>,
    sink: &dyn WarningSink,
) -> Result<Value, Diagnostic> {
    let span = left.span.merge(right.span);
    let Some(n) = left.value.as_number() else {
        return Err(binary_type_mismatch(span, op, left.value, right.value));
    };
    match op {
        BinaryOp::Div | BinaryOp::FloorDiv => {
            sink.warn(
                Diagnostic::warning(WarningKind::ValueDivInfinity, span)
                    .with_arg(left.value.display_value()),
            );
            Ok(Value::from(n.zero_like()))
        }
        BinaryOp::Mul if n.is_zero() => Ok(Value::from(dividend)),
        BinaryOp::Mul => Ok(Value::Infinity(dividend)),
        _ => Err(binary_type_mismatch(span, op, left.value, right.value)),
    }
}

/// Arithmetic on two numbers. Int with int stays int (except `/`), anything
/// with a float is float.
fn numeric(
    op: BinaryOp,
    dividend: Dividend,
    b: Number,
    span: Span,
    sink: &dyn WarningSink,
) -> Result<Value, Diagnostic> {
    let overflow = || number_overflow(span, op);
    let a = dividend.number();

    if b.is_zero() {
        match op {
            BinaryOp::Div | BinaryOp::FloorDiv => {
                sink.warn(Diagnostic::warning(WarningKind::DivideByZero, span).with_arg(a));
                return Ok(Value::Infinity(dividend));
            }
            BinaryOp::Mod => {
                sink.warn(Diagnostic::warning(WarningKind::ModByZero, span).with_arg(a));
                return Ok(Value::from(a.zero_like()));
            }
            _ => {}
        }
    }

    let result = match (a, b) {
        (Number::Int(x), Number::Int(y)) => match op {
            BinaryOp::Add => Number::Int(x.checked_add(y).ok_or_else(overflow)?),
            BinaryOp::Sub => Number::Int(x.checked_sub(y).ok_or_else(overflow)?),
            BinaryOp::Mul => Number::Int(x.checked_mul(y).ok_or_else(overflow)?),
            BinaryOp::Div => Number::Float(a.to_f64() / b.to_f64()),
            BinaryOp::FloorDiv => Number::Int(floor_div(x, y).ok_or_else(overflow)?),
            BinaryOp::Mod => Number::Int(floor_mod(x, y).ok_or_else(overflow)?),
            BinaryOp::Pow => match u32::try_from(y) {
                Ok(exp) => Number::Int(x.checked_pow(exp).ok_or_else(overflow)?),
                Err(_) if y < 0 => Number::Float(a.to_f64().powf(b.to_f64())),
                Err(_) => return Err(overflow()),
            },
            _ => return Err(illegal_operation(span, op, "int and int")),
        },
        _ => {
            let (x, y) = (a.to_f64(), b.to_f64());
            Number::Float(match op {
                BinaryOp::Add => x + y,
                BinaryOp::Sub => x - y,
                BinaryOp::Mul => x * y,
                BinaryOp::Div => x / y,
                BinaryOp::FloorDiv => (x / y).floor(),
                BinaryOp::Mod => {
                    let r = x % y;
                    if r != 0.0 && (r < 0.0) != (y < 0.0) {
                        r + y
                    } else {
                        r
                    }
                }
                BinaryOp::Pow => x.powf(y),
                _ => return Err(illegal_operation(span, op, "float and float")),
            })
        }
    };
    Ok(Value::from(result))
}

/// Integer division rounding toward negative infinity.
fn floor_div(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(x: i64, y: i64) -> Option<i64> {
    let r = x.checked_rem(y)?;
    if r != 0 && ((r < 0) != (y < 0)) {
        r.checked_add(y)
    } else {
        Some(r)
    }
}

/// Repeat count from a numeric operand. Floats are rounded with a warning.
fn repeat_count(
    count: &Value,
    span: Span,
    sink: &dyn WarningSink,
    number_first: bool,
) -> Result<usize, Diagnostic> {
    let rounded = match count.as_number() {
        Some(Number::Float(f)) => {
            let rounded = float_to_int(f.round(), span)?;
            if !number_first {
                sink.warn(
                    Diagnostic::warning(WarningKind::StringMultFloat, span)
                        .with_arg(count.display_value())
                        .with_arg(rounded),
                );
            }
            rounded
        }
        Some(Number::Int(i)) => i,
        None => 0,
    };
    if number_first {
        sink.warn(Diagnostic::warning(WarningKind::ValueMultString, span).with_arg(rounded));
    }
    Ok(usize::try_from(rounded).unwrap_or(0))
}

fn repeat(s: &str, count: usize, span: Span) -> Result<Value, Diagnostic> {
    match s.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::string(s.repeat(count))),
        _ => Err(illegal_value(
            span,
            format_args!("Repeating a string of length {} {count} times is too long", s.len()),
        )),
    }
}

/// Apply a unary operator.
pub fn evaluate_unary(op: UnaryOp, operand: Operand<'_>) -> Result<Value, Diagnostic> {
    let span = operand.span;
    match (op, operand.value) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_true())),
        (_, Value::List(items)) => items
            .iter()
            .map(|item| evaluate_unary(op, Operand::new(item, span)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list),
        (UnaryOp::Neg, Value::Infinity(dividend)) => {
            negate(dividend.number(), span).map(|n| Value::Infinity(n.into()))
        }
        (UnaryOp::Plus, Value::Infinity(_)) => Ok(operand.value.clone()),
        (UnaryOp::Neg, value) => match value.as_number() {
            Some(n) => negate(n, span).map(Value::from),
            None => Err(illegal_operation(span, op, value.type_name())),
        },
        (UnaryOp::Plus, value) => match value.as_number() {
            Some(n) => Ok(Value::from(n)),
            None => Err(illegal_operation(span, op, value.type_name())),
        },
    }
}

fn negate(n: Number, span: Span) -> Result<Number, Diagnostic> {
    match n {
        Number::Int(i) => i
            .checked_neg()
            .map(Number::Int)
            .ok_or_else(|| number_overflow(span, UnaryOp::Neg)),
        Number::Float(f) => Ok(Number::Float(-f)),
    }
}

#[cfg(test)]
mod tests;
