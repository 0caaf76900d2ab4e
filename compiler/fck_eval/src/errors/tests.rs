use fck_ir::{BinaryOp, Span, TypeKind};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn describe_scalars_with_their_value() {
    assert_eq!(describe(&Value::Int(3)), "int 3");
    assert_eq!(describe(&Value::string("a\"b")), "str \"a\\\"b\"");
    assert_eq!(describe(&Value::list(vec![Value::Null; 2])), "list of 2 elements");
    assert_eq!(describe(&Value::Null), "null");
}

#[test]
fn messages_read_naturally() {
    let span = Span::DUMMY;
    assert_eq!(
        binary_type_mismatch(span, BinaryOp::Sub, &Value::string("a"), &Value::Int(1)).message(),
        "Operation '-' is not supported for str and int"
    );
    assert_eq!(
        illegal_cast(span, &Value::string("abc"), TypeKind::Int).message(),
        "Cannot cast str \"abc\" to int"
    );
    assert_eq!(
        wrong_arguments(span, "f", "expected at most 2 arguments, got 3").message(),
        "'f': expected at most 2 arguments, got 3"
    );
    assert_eq!(
        argument_type(span, "a", "f", TypeKind::Int, &Value::list(Vec::new())).message(),
        "Argument 'a' of 'f' expects int, got list"
    );
}

#[test]
fn diagnostics_convert_into_fatal_errors() {
    let error: EvalError = return_outside_function(Span::DUMMY).into();
    assert!(matches!(error, EvalError::Fatal(_)));
    let control: EvalError = ControlAction::Break(None).into();
    assert_eq!(control, EvalError::Control(ControlAction::Break(None)));
}
