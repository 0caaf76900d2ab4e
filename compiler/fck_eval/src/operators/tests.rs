use fck_diagnostic::sink::BufferWarningSink;
use fck_diagnostic::{ErrorCode, ErrorKind, WarningKind};
use fck_ir::{BinaryOp, Span, UnaryOp};
use pretty_assertions::assert_eq;

use super::*;

fn binary(op: BinaryOp, left: &Value, right: &Value) -> (Value, Vec<ErrorCode>) {
    let sink = BufferWarningSink::new();
    let value = evaluate_binary(
        op,
        Operand::new(left, Span::DUMMY),
        Operand::new(right, Span::DUMMY),
        &sink,
    )
    .unwrap_or_else(|e| panic!("{left:?} {op} {right:?} failed: {e}"));
    (value, sink.take().into_iter().map(|w| w.code).collect())
}

fn binary_value(op: BinaryOp, left: &Value, right: &Value) -> Value {
    binary(op, left, right).0
}

fn binary_error(op: BinaryOp, left: &Value, right: &Value) -> ErrorCode {
    match evaluate_binary(
        op,
        Operand::new(left, Span::DUMMY),
        Operand::new(right, Span::DUMMY),
        &BufferWarningSink::new(),
    ) {
        Ok(value) => panic!("{left:?} {op} {right:?} gave {value:?}"),
        Err(e) => e.code,
    }
}

#[test]
fn numeric_promotion() {
    assert_eq!(binary_value(BinaryOp::Add, &Value::Int(2), &Value::Int(3)), Value::Int(5));
    assert_eq!(
        binary_value(BinaryOp::Add, &Value::Int(2), &Value::Float(3.0)),
        Value::Float(5.0)
    );
    assert_eq!(binary_value(BinaryOp::Add, &Value::Bool(true), &Value::Int(1)), Value::Int(2));
    assert_eq!(binary_value(BinaryOp::Div, &Value::Int(7), &Value::Int(2)), Value::Float(3.5));
    assert_eq!(binary_value(BinaryOp::FloorDiv, &Value::Int(-7), &Value::Int(2)), Value::Int(-4));
    assert_eq!(binary_value(BinaryOp::Mod, &Value::Int(-7), &Value::Int(3)), Value::Int(2));
    assert_eq!(
        binary_value(BinaryOp::Mod, &Value::Float(7.5), &Value::Int(-2)),
        Value::Float(-0.5)
    );
    assert_eq!(binary_value(BinaryOp::Pow, &Value::Int(2), &Value::Int(10)), Value::Int(1024));
    assert_eq!(binary_value(BinaryOp::Pow, &Value::Int(2), &Value::Int(-1)), Value::Float(0.5));
}

#[test]
fn integer_overflow_is_fatal() {
    assert_eq!(
        binary_error(BinaryOp::Add, &Value::Int(i64::MAX), &Value::Int(1)),
        ErrorKind::NumberOverflow.code()
    );
    assert_eq!(
        binary_error(BinaryOp::Pow, &Value::Int(10), &Value::Int(40)),
        ErrorKind::NumberOverflow.code()
    );
}

#[test]
fn division_by_zero_remembers_the_dividend() {
    let (infinity, warnings) = binary(BinaryOp::Div, &Value::Int(5), &Value::Int(0));
    assert_eq!(infinity, Value::Infinity(Number::Int(5).into()));
    assert_eq!(warnings, vec![WarningKind::DivideByZero.code()]);

    assert_eq!(binary_value(BinaryOp::Mul, &infinity, &Value::Int(0)), Value::Int(5));
    assert_eq!(binary_value(BinaryOp::Mul, &Value::Int(0), &infinity), Value::Int(5));
    assert_eq!(binary_value(BinaryOp::Mul, &infinity, &Value::Int(3)), infinity);

    let (zero, warnings) = binary(BinaryOp::Div, &infinity, &infinity);
    assert_eq!(zero, Value::Int(0));
    assert_eq!(warnings, vec![WarningKind::InfinityDivInfinity.code()]);

    let (same, warnings) = binary(BinaryOp::Div, &infinity, &Value::Int(2));
    assert_eq!(same, infinity);
    assert_eq!(warnings, vec![WarningKind::InfinityDivValue.code()]);

    let (zero, warnings) = binary(BinaryOp::Div, &Value::Float(2.5), &infinity);
    assert_eq!(zero, Value::Float(0.0));
    assert_eq!(warnings, vec![WarningKind::ValueDivInfinity.code()]);

    assert_eq!(
        binary_error(BinaryOp::Add, &infinity, &Value::Int(1)),
        ErrorKind::IllegalOperation.code()
    );
}

#[test]
fn infinity_times_zero_restores_a_bool_dividend() {
    let (infinity, warnings) = binary(BinaryOp::Div, &Value::Bool(true), &Value::Int(0));
    assert_eq!(infinity, Value::Infinity(Dividend::Bool(true)));
    assert_eq!(infinity.to_string(), "Infinity");
    assert_eq!(warnings, vec![WarningKind::DivideByZero.code()]);

    assert_eq!(binary_value(BinaryOp::Mul, &infinity, &Value::Int(0)), Value::Bool(true));
    assert_eq!(binary_value(BinaryOp::Mul, &Value::Float(0.0), &infinity), Value::Bool(true));
    assert_eq!(binary_value(BinaryOp::Add, &Value::Bool(true), &Value::Int(1)), Value::Int(2));
}

#[test]
fn modulo_by_zero_keeps_the_dividend_kind() {
    let (value, warnings) = binary(BinaryOp::Mod, &Value::Float(4.5), &Value::Int(0));
    assert_eq!(value, Value::Float(0.0));
    assert_eq!(warnings, vec![WarningKind::ModByZero.code()]);
}

#[test]
fn string_rules() {
    assert_eq!(
        binary_value(BinaryOp::Add, &Value::string("a"), &Value::Float(1.0)),
        Value::string("a1.0")
    );
    assert_eq!(
        binary_value(BinaryOp::Add, &Value::string("a"), &Value::Null),
        Value::string("anull")
    );
    assert_eq!(
        binary_value(BinaryOp::Add, &Value::Null, &Value::string("a")),
        Value::string("nulla")
    );
    assert_eq!(binary_value(BinaryOp::Add, &Value::Null, &Value::Int(2)), Value::Int(2));

    assert_eq!(
        binary(BinaryOp::Mul, &Value::string("ab"), &Value::Int(3)),
        (Value::string("ababab"), Vec::new())
    );
    assert_eq!(
        binary(BinaryOp::Mul, &Value::string("ab"), &Value::Float(1.6)),
        (Value::string("abab"), vec![WarningKind::StringMultFloat.code()])
    );
    assert_eq!(
        binary(BinaryOp::Mul, &Value::Int(2), &Value::string("ab")),
        (Value::string("abab"), vec![WarningKind::ValueMultString.code()])
    );
    assert_eq!(
        binary_value(BinaryOp::Mul, &Value::string("ab"), &Value::Int(-2)),
        Value::string("")
    );
    assert_eq!(
        binary_error(BinaryOp::Mul, &Value::string("ab"), &Value::Int(i64::MAX)),
        ErrorKind::IllegalValue.code()
    );
    assert_eq!(
        binary_error(BinaryOp::Sub, &Value::string("ab"), &Value::Int(1)),
        ErrorKind::IllegalOperation.code()
    );
}

#[test]
fn list_rules() {
    let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(
        binary_value(BinaryOp::Add, &list, &Value::list(vec![Value::Int(3)])),
        Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(
        binary_value(BinaryOp::Mul, &list, &Value::Int(10)),
        Value::list(vec![Value::Int(10), Value::Int(20)])
    );
    assert_eq!(
        binary_error(BinaryOp::Add, &list, &Value::string("x")),
        ErrorKind::IllegalOperation.code()
    );
}

#[test]
fn comparisons() {
    assert_eq!(binary_value(BinaryOp::Eq, &Value::Int(1), &Value::Float(1.0)), Value::Bool(true));
    assert_eq!(binary_value(BinaryOp::Eq, &Value::Int(1), &Value::string("1")), Value::Bool(false));
    assert_eq!(binary_value(BinaryOp::NotEq, &Value::Null, &Value::Int(0)), Value::Bool(true));
    assert_eq!(binary_value(BinaryOp::Lt, &Value::Int(1), &Value::Float(1.5)), Value::Bool(true));
    assert_eq!(
        binary_value(BinaryOp::GtEq, &Value::string("b"), &Value::string("a")),
        Value::Bool(true)
    );
    assert_eq!(
        binary_value(BinaryOp::Lt, &Value::Float(f64::NAN), &Value::Int(1)),
        Value::Bool(false)
    );
    assert_eq!(
        binary_error(BinaryOp::Lt, &Value::string("a"), &Value::Int(1)),
        ErrorKind::IllegalOperation.code()
    );
}

#[test]
fn logical_operators_produce_bools() {
    assert_eq!(binary_value(BinaryOp::And, &Value::Int(1), &Value::string("x")), Value::Bool(true));
    assert_eq!(binary_value(BinaryOp::Or, &Value::Int(0), &Value::Null), Value::Bool(false));
}

#[test]
fn unary_operators() {
    let unary = |op, value: &Value| evaluate_unary(op, Operand::new(value, Span::DUMMY));

    assert_eq!(unary(UnaryOp::Neg, &Value::Int(3)), Ok(Value::Int(-3)));
    assert_eq!(unary(UnaryOp::Neg, &Value::Bool(true)), Ok(Value::Int(-1)));
    assert_eq!(unary(UnaryOp::Plus, &Value::Float(2.5)), Ok(Value::Float(2.5)));
    assert_eq!(unary(UnaryOp::Not, &Value::string("")), Ok(Value::Bool(true)));
    assert_eq!(
        unary(UnaryOp::Neg, &Value::Infinity(Number::Int(4).into())),
        Ok(Value::Infinity(Number::Int(-4).into()))
    );
    assert_eq!(
        unary(UnaryOp::Neg, &Value::list(vec![Value::Int(1), Value::Float(2.0)])),
        Ok(Value::list(vec![Value::Int(-1), Value::Float(-2.0)]))
    );
    assert_eq!(
        unary(UnaryOp::Neg, &Value::Int(i64::MIN)).map_err(|e| e.code),
        Err(ErrorKind::NumberOverflow.code())
    );
    assert_eq!(
        unary(UnaryOp::Neg, &Value::string("a")).map_err(|e| e.code),
        Err(ErrorKind::IllegalOperation.code())
    );
}
