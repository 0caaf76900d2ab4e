//! Explicit casts (`as`) and the implicit coercions applied when a value is
//! stored in a typed variable.

use fck_diagnostic::{Diagnostic, WarningKind, WarningSink};
use fck_ir::{Span, TypeKind, VarType};

use super::{Number, Value};
use crate::errors::{illegal_cast, illegal_value, illegal_variable_value, number_overflow};

/// The value a typed variable starts with when declared without one.
pub fn zero_value(kind: TypeKind) -> Value {
    match kind {
        TypeKind::Int => Value::Int(0),
        TypeKind::Float => Value::Float(0.0),
        TypeKind::Bool => Value::Bool(false),
        TypeKind::Str => Value::string(""),
        TypeKind::List => Value::list(Vec::new()),
    }
}

impl Value {
    /// Convert to `target`, as `value as <target>` does.
    ///
    /// Converting a value to its own kind returns it unchanged, so casting
    /// twice is the same as casting once.
    pub fn as_type(&self, target: TypeKind, span: Span) -> Result<Value, Diagnostic> {
        match (self, target) {
            (Value::Null, _) => Ok(zero_value(target)),
            (Value::List(_), TypeKind::List) => Ok(self.clone()),
            (Value::List(items), TypeKind::Bool) => Ok(Value::Bool(has_content(items))),
            (Value::List(items), _) => match single_element(items) {
                Some(inner) => inner.as_type(target, span),
                None => Err(illegal_value(
                    span,
                    format_args!(
                        "A list of {} elements cannot be converted to {target}",
                        items.len()
                    ),
                )),
            },
            (_, TypeKind::List) => Ok(Value::list(vec![self.clone()])),
            (Value::Str(_), TypeKind::Str) => Ok(self.clone()),
            (_, TypeKind::Str) => Ok(Value::string(self.display_value())),
            (Value::Str(s), TypeKind::Bool) => parse_bool(s)
                .map(Value::Bool)
                .ok_or_else(|| illegal_cast(span, self, target)),
            (_, TypeKind::Bool) => Ok(Value::Bool(self.is_true())),
            (Value::Str(s), TypeKind::Int) => match parse_number(s) {
                Some(Number::Int(i)) => Ok(Value::Int(i)),
                Some(Number::Float(f)) => float_to_int(f, span).map(Value::Int),
                None => Err(illegal_cast(span, self, target)),
            },
            (Value::Str(s), TypeKind::Float) => parse_number(s)
                .map(|n| Value::Float(n.to_f64()))
                .ok_or_else(|| illegal_cast(span, self, target)),
            (Value::Infinity(dividend), TypeKind::Float) => {
                Ok(Value::Float(if dividend.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }))
            }
            (Value::Int(_) | Value::Float(_) | Value::Bool(_), TypeKind::Int) => {
                match self.as_number() {
                    Some(Number::Int(i)) => Ok(Value::Int(i)),
                    Some(Number::Float(f)) => float_to_int(f, span).map(Value::Int),
                    None => Err(illegal_cast(span, self, target)),
                }
            }
            (Value::Int(_) | Value::Float(_) | Value::Bool(_), TypeKind::Float) => self
                .as_number()
                .map(|n| Value::Float(n.to_f64()))
                .ok_or_else(|| illegal_cast(span, self, target)),
            (Value::Infinity(_) | Value::Function(_) | Value::Builtin(_), _) => {
                Err(illegal_cast(span, self, target))
            }
        }
    }
}

/// Coerce `value` for storage in a variable declared as `ty`.
///
/// Lossy but recoverable mismatches warn and substitute; impossible ones
/// are fatal `IllegalVariableValue`.
pub fn coerce_for_assignment(
    value: Value,
    ty: VarType,
    name: &str,
    span: Span,
    sink: &dyn WarningSink,
) -> Result<Value, Diagnostic> {
    let VarType::Typed(kind) = ty else {
        return Ok(value);
    };

    match (&value, kind) {
        (Value::Null, _) => Ok(zero_value(kind)),
        (Value::List(_), TypeKind::List) | (Value::Str(_), TypeKind::Str) => Ok(value),
        (_, TypeKind::List) => {
            sink.warn(
                Diagnostic::warning(WarningKind::ListFromValue, span)
                    .with_arg(value.type_name())
                    .with_arg(name),
            );
            Ok(Value::list(vec![value]))
        }
        (Value::List(items), _) => match single_element(items) {
            Some(inner) => {
                sink.warn(
                    Diagnostic::warning(WarningKind::ValueFromList, span)
                        .with_arg(kind)
                        .with_arg(name),
                );
                coerce_for_assignment(inner.clone(), ty, name, span, sink)
            }
            None => Err(illegal_variable_value(span, &value, kind, name)),
        },
        (Value::Str(_), TypeKind::Int | TypeKind::Float) => {
            let parsed = value.as_type(kind, span)?;
            sink.warn(
                Diagnostic::warning(WarningKind::ValueFromString, span)
                    .with_arg(kind)
                    .with_arg(name),
            );
            Ok(parsed)
        }
        (Value::Str(_), TypeKind::Bool) => value.as_type(kind, span),
        (Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Infinity(_), TypeKind::Str) => {
            sink.warn(
                Diagnostic::warning(WarningKind::StringFromValue, span)
                    .with_arg(value.type_name())
                    .with_arg(name),
            );
            Ok(Value::string(value.display_value()))
        }
        (Value::Int(_) | Value::Float(_) | Value::Bool(_), _) => value.as_type(kind, span),
        (Value::Infinity(_), TypeKind::Int | TypeKind::Float) => Ok(value),
        (Value::Infinity(_), TypeKind::Bool) => Ok(Value::Bool(value.is_true())),
        (Value::Function(_) | Value::Builtin(_), _) => {
            Err(illegal_variable_value(span, &value, kind, name))
        }
    }
}

/// Whether a list holds anything other than (nested) empty lists.
pub(crate) fn has_content(items: &[Value]) -> bool {
    items.iter().any(|item| match item {
        Value::List(inner) => has_content(inner),
        _ => true,
    })
}

/// The only element of a list, looking through nested single-element lists.
pub(crate) fn single_element(items: &[Value]) -> Option<&Value> {
    match items {
        [Value::List(inner)] => single_element(inner),
        [only] => Some(only),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    parse_number(text).map(|n| Value::from(n).is_true())
}

/// Decimal integer or finite float text.
pub(crate) fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::Int(i));
    }
    let has_digit = text.bytes().any(|b| b.is_ascii_digit());
    match text.parse::<f64>() {
        Ok(f) if has_digit && f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}

/// Truncate toward zero, failing outside the `i64` range.
pub(crate) fn float_to_int(f: f64, span: Span) -> Result<i64, Diagnostic> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() || f >= LIMIT || f < -LIMIT {
        return Err(number_overflow(span, "as int"));
    }
    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
    Ok(f.trunc() as i64)
}
