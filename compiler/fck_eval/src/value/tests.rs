use fck_diagnostic::sink::BufferWarningSink;
use fck_diagnostic::{ErrorCode, ErrorKind, WarningKind};
use fck_ir::{Span, TypeKind, VarType};
use pretty_assertions::assert_eq;

use super::*;

fn cast(value: &Value, target: TypeKind) -> Value {
    value
        .as_type(target, Span::DUMMY)
        .unwrap_or_else(|e| panic!("{value:?} as {target}: {e}"))
}

fn cast_error(value: &Value, target: TypeKind) -> ErrorCode {
    match value.as_type(target, Span::DUMMY) {
        Ok(v) => panic!("{value:?} as {target} gave {v:?}"),
        Err(e) => e.code,
    }
}

fn coerce(value: Value, kind: TypeKind) -> (Result<Value, ErrorCode>, Vec<ErrorCode>) {
    let sink = BufferWarningSink::new();
    let result = coerce_for_assignment(value, VarType::Typed(kind), "x", Span::DUMMY, &sink)
        .map_err(|e| e.code);
    (result, sink.take().into_iter().map(|w| w.code).collect())
}

#[test]
fn debug_and_print_forms() {
    let list = Value::list(vec![Value::Int(1), Value::string("a\n"), Value::Float(2.0)]);
    assert_eq!(list.to_string(), r#"[1, "a\n", 2.0]"#);
    assert_eq!(Value::string("hi").to_string(), "\"hi\"");
    assert_eq!(Value::string("hi").display_value(), "hi");
    assert_eq!(Value::Float(0.5).to_string(), "0.5");
    assert_eq!(Value::Bool(false).display_value(), "false");
    assert_eq!(Value::Null.display_value(), "null");
    assert_eq!(Value::Infinity(Number::Int(3).into()).to_string(), "Infinity");
    assert_eq!(Value::Infinity(Number::Float(-1.0).into()).to_string(), "-Infinity");
}

#[test]
fn truthiness() {
    assert!(Value::Int(1).is_true());
    assert!(!Value::Int(0).is_true());
    assert!(!Value::Int(-3).is_true());
    assert!(!Value::Float(-0.5).is_true());
    assert!(Value::string("x").is_true());
    assert!(!Value::string("").is_true());
    assert!(!Value::list(Vec::new()).is_true());
    assert!(!Value::Null.is_true());
    assert!(Value::Infinity(Number::Int(1).into()).is_true());
    assert!(!Value::Infinity(Number::Int(-1).into()).is_true());
}

#[test]
fn language_equality_is_looser_than_structural() {
    assert!(Value::Int(1).equals(&Value::Float(1.0)));
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert!(!Value::Int(1).equals(&Value::Bool(true)));
    assert!(Value::list(vec![Value::Int(2)]).equals(&Value::list(vec![Value::Float(2.0)])));
    assert!(!Value::Null.equals(&Value::Int(0)));
}

#[test]
fn casts_between_scalars() {
    assert_eq!(cast(&Value::Float(2.9), TypeKind::Int), Value::Int(2));
    assert_eq!(cast(&Value::Float(-2.9), TypeKind::Int), Value::Int(-2));
    assert_eq!(cast(&Value::Int(2), TypeKind::Float), Value::Float(2.0));
    assert_eq!(cast(&Value::Int(0), TypeKind::Bool), Value::Bool(false));
    assert_eq!(cast(&Value::Bool(true), TypeKind::Int), Value::Int(1));
    assert_eq!(cast(&Value::Bool(true), TypeKind::Str), Value::string("true"));
    assert_eq!(cast(&Value::Float(1.0), TypeKind::Str), Value::string("1.0"));
    assert_eq!(cast(&Value::Null, TypeKind::Str), Value::string(""));
    assert_eq!(cast(&Value::Null, TypeKind::Int), Value::Int(0));
    assert_eq!(cast(&Value::Int(4), TypeKind::List), Value::list(vec![Value::Int(4)]));
}

#[test]
fn casts_from_strings() {
    assert_eq!(cast(&Value::string(" 42 "), TypeKind::Int), Value::Int(42));
    assert_eq!(cast(&Value::string("2.5"), TypeKind::Int), Value::Int(2));
    assert_eq!(cast(&Value::string("2.5"), TypeKind::Float), Value::Float(2.5));
    assert_eq!(cast(&Value::string("TRUE"), TypeKind::Bool), Value::Bool(true));
    assert_eq!(cast(&Value::string("0"), TypeKind::Bool), Value::Bool(false));
    assert_eq!(cast_error(&Value::string("abc"), TypeKind::Int), ErrorKind::IllegalCastType.code());
    assert_eq!(
        cast_error(&Value::string("inf"), TypeKind::Float),
        ErrorKind::IllegalCastType.code()
    );
    assert_eq!(
        cast_error(&Value::string("yes"), TypeKind::Bool),
        ErrorKind::IllegalCastType.code()
    );
}

#[test]
fn casts_from_lists() {
    let nested = Value::list(vec![Value::list(vec![Value::string("7")])]);
    assert_eq!(cast(&nested, TypeKind::Int), Value::Int(7));
    assert_eq!(cast(&nested, TypeKind::Bool), Value::Bool(true));

    let hollow = Value::list(vec![Value::list(Vec::new())]);
    assert_eq!(cast(&hollow, TypeKind::Bool), Value::Bool(false));

    let pair = Value::list(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(cast(&pair, TypeKind::List), pair);
    assert_eq!(cast_error(&pair, TypeKind::Int), ErrorKind::IllegalValue.code());
}

#[test]
fn casts_that_never_work() {
    assert_eq!(
        cast_error(&Value::Infinity(Number::Int(1).into()), TypeKind::Int),
        ErrorKind::IllegalCastType.code()
    );
    assert_eq!(cast_error(&Value::Float(1e300), TypeKind::Int), ErrorKind::NumberOverflow.code());
}

#[test]
fn assignment_coercions_warn() {
    assert_eq!(
        coerce(Value::string("12"), TypeKind::Int),
        (Ok(Value::Int(12)), vec![WarningKind::ValueFromString.code()])
    );
    assert_eq!(
        coerce(Value::Int(3), TypeKind::Str),
        (Ok(Value::string("3")), vec![WarningKind::StringFromValue.code()])
    );
    assert_eq!(
        coerce(Value::Int(3), TypeKind::List),
        (
            Ok(Value::list(vec![Value::Int(3)])),
            vec![WarningKind::ListFromValue.code()]
        )
    );
    assert_eq!(
        coerce(Value::list(vec![Value::Float(1.5)]), TypeKind::Float),
        (Ok(Value::Float(1.5)), vec![WarningKind::ValueFromList.code()])
    );
    assert_eq!(coerce(Value::Float(1.5), TypeKind::Int), (Ok(Value::Int(1)), Vec::new()));
    assert_eq!(coerce(Value::Null, TypeKind::Bool), (Ok(Value::Bool(false)), Vec::new()));
}

#[test]
fn assignment_coercions_that_fail() {
    assert_eq!(
        coerce(Value::list(vec![Value::Int(1), Value::Int(2)]), TypeKind::Int).0,
        Err(ErrorKind::IllegalVariableValue.code())
    );
    assert_eq!(
        coerce(Value::string("abc"), TypeKind::Int).0,
        Err(ErrorKind::IllegalCastType.code())
    );
}

#[test]
fn auto_variables_take_anything() {
    let sink = BufferWarningSink::new();
    let value = Value::list(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(
        coerce_for_assignment(value.clone(), VarType::Auto, "x", Span::DUMMY, &sink),
        Ok(value)
    );
    assert!(sink.is_empty());
}

#[test]
fn zero_values() {
    assert_eq!(zero_value(TypeKind::Int), Value::Int(0));
    assert_eq!(zero_value(TypeKind::Str), Value::string(""));
    assert_eq!(zero_value(TypeKind::List), Value::list(Vec::new()));
}
