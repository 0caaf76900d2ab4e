//! Runtime values.
//!
//! Scalars are inline; strings, lists and callables are reference counted
//! and never mutated after construction, so cloning a `Value` is cheap and
//! operators always build new values.
//!
//! Two renderings exist: `display_value()` is what `print` shows (strings
//! without quotes), `Display` is the debug form `log` shows.

mod convert;

pub use convert::{coerce_for_assignment, zero_value};
pub(crate) use convert::float_to_int;

use std::fmt;
use std::rc::Rc;

use fck_ir::{ExprId, Name, Param, SharedArena, SourceFile, VarType};

use crate::environment::LocalScope;
use crate::interpreter::CallContext;
use crate::{EvalResult, Scope};

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    List(Rc<[Value]>),
    /// Result of a division by zero, remembering the dividend.
    Infinity(Dividend),
    Function(Rc<FunctionValue>),
    Builtin(Rc<BuiltinValue>),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }

    /// Type name as shown to users and returned by `type()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Infinity(_) => "infinity",
            Value::Function(_) | Value::Builtin(_) => "function",
        }
    }

    /// Numbers are truthy when greater than zero, strings and lists when
    /// non-empty. Infinity follows the sign of its dividend.
    pub fn is_true(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int(n) => *n > 0,
            Value::Float(f) => *f > 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Infinity(dividend) => !dividend.is_negative(),
            Value::Function(_) | Value::Builtin(_) => true,
        }
    }

    /// Numeric view: ints and floats as themselves, bools as 0 or 1.
    #[inline]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            _ => None,
        }
    }

    /// Length of a string (in characters) or list.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Text for user output. Strings print raw, null prints as `null`.
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            _ => self.to_string(),
        }
    }

    /// Language-level equality: total, with ints and floats compared
    /// numerically and everything else compared within its own kind.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (self.as_number(), other.as_number()) {
                    (Some(a), Some(b)) => a.total_eq(b),
                    _ => false,
                }
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Infinity(a), Value::Infinity(b)) => a.is_negative() == b.is_negative(),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl From<Dividend> for Value {
    fn from(dividend: Dividend) -> Self {
        match dividend {
            Dividend::Number(n) => Value::from(n),
            Dividend::Bool(b) => Value::Bool(b),
        }
    }
}

/// Strict structural equality, used by tests and the property checks.
/// Unlike `equals`, `Int(1)` and `Float(1.0)` differ here.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Infinity(a), Value::Infinity(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Infinity(n) => write!(f, "Infinity({n:?})"),
            Value::Function(func) => write!(f, "Function({})", func.display_name()),
            Value::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write_quoted(f, s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Infinity(dividend) if dividend.is_negative() => f.write_str("-Infinity"),
            Value::Infinity(_) => f.write_str("Infinity"),
            Value::Function(func) => write!(f, "<function {}>", func.display_name()),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Floats always show a fractional part so `5.0` and `5` stay distinct.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

// ─── Numbers ───

/// A numeric value after bool-to-int promotion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            #[expect(clippy::cast_precision_loss, reason = "int to float promotion")]
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i < 0,
            Number::Float(f) => f < 0.0,
        }
    }

    /// Zero of the same kind.
    #[inline]
    pub fn zero_like(self) -> Number {
        match self {
            Number::Int(_) => Number::Int(0),
            Number::Float(_) => Number::Float(0.0),
        }
    }

    /// Numeric equality across kinds.
    pub fn total_eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

/// What an `Infinity` was divided from. Bools keep their kind so that
/// `true / 0 * 0` gives back `true`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Dividend {
    Number(Number),
    Bool(bool),
}

impl Dividend {
    /// Dividend of `value / 0`, for a value with a numeric view.
    pub fn of(value: &Value) -> Option<Dividend> {
        match value {
            Value::Bool(b) => Some(Dividend::Bool(*b)),
            other => other.as_number().map(Dividend::Number),
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.number().is_negative()
    }

    #[inline]
    pub fn number(self) -> Number {
        match self {
            Dividend::Number(n) => n,
            Dividend::Bool(b) => Number::Int(i64::from(b)),
        }
    }
}

impl From<Number> for Dividend {
    fn from(n: Number) -> Self {
        Dividend::Number(n)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

// ─── Callables ───

/// A user-defined function.
///
/// Carries everything needed to run its body later: the arena the body was
/// parsed into, the source text for diagnostics, and the scope it was
/// defined in.
pub struct FunctionValue {
    pub name: Option<Name>,
    pub display: &'static str,
    pub params: Vec<Param>,
    pub body: ExprId,
    pub arena: SharedArena,
    pub source: Rc<SourceFile>,
    pub closure: LocalScope<Scope>,
}

impl FunctionValue {
    /// Name for tracebacks and error messages.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        self.display
    }
}

/// Native implementation of a builtin.
pub type NativeFn = dyn Fn(&mut CallContext<'_>, &[Value]) -> EvalResult;

/// Declared parameter of a builtin.
#[derive(Clone, Debug)]
pub struct NativeParam {
    pub name: &'static str,
    pub ty: VarType,
    pub default: Option<Value>,
}

impl NativeParam {
    pub fn new(name: &'static str, ty: VarType) -> Self {
        NativeParam {
            name,
            ty,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A function implemented by the host.
pub struct BuiltinValue {
    pub name: &'static str,
    pub params: Vec<NativeParam>,
    pub native: Box<NativeFn>,
}

#[cfg(test)]
mod tests;
