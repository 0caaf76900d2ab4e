use fck_diagnostic::{ErrorCode, ErrorKind, WarningKind};
use fck_eval::Value;
use pretty_assertions::assert_eq;

use super::*;

fn session() -> Session {
    Session::builder()
        .print(PrintOutput::Buffer)
        .warnings(WarningOutput::Buffer)
        .color(ColorMode::Never)
        .build()
        .with_std_builtins()
}

fn value(session: &mut Session, text: &str) -> Value {
    let result = session.run("<test>", text, None);
    if let Some(error) = &result.error {
        panic!("{text:?} failed: {error}");
    }
    let Some(value) = result.value.clone() else {
        panic!("{text:?} produced no value: {result:?}");
    };
    value
}

fn warning_codes(session: &Session) -> Vec<ErrorCode> {
    session.take_warnings().into_iter().map(|w| w.code).collect()
}

#[test]
fn state_carries_over_between_runs() {
    let mut s = session();
    value(&mut s, "int x :: 40");
    value(&mut s, "def bump() { x :+: 1 }");
    value(&mut s, "bump()\nbump()");
    assert_eq!(s.lookup("x"), Some(Value::Int(42)));
}

/// `iterate 5 {` then `print(1) }`: the first line alone prints nothing, and
/// the joined entry is evaluated exactly once. That single evaluation runs
/// the loop body five times.
#[test]
fn open_block_waits_for_the_rest() {
    let mut s = session();
    let first = s.run("<test>", "iterate 5 {", None);
    assert!(first.is_partial);
    assert!(first.error.is_none());
    assert_eq!(s.output(), "");

    let second = s.run("<test>", "print(1) }", first.pending);
    assert!(second.is_success(), "{second:?}");
    assert_eq!(s.output(), "1\n1\n1\n1\n1\n");
}

#[test]
fn continuation_lines_are_separate_statements() {
    let mut s = session();
    let mut result = s.run("<test>", "if true {", None);
    for line in ["int x :: 1", "print(x) }"] {
        assert!(result.is_partial, "{result:?}");
        result = s.run("<test>", line, result.pending);
    }
    assert!(result.is_success(), "{result:?}");
    assert_eq!(s.output(), "1\n");
}

#[test]
fn buffered_line_never_runs_on_its_own() {
    let mut s = session();
    let first = s.run("<test>", "if true {", None);
    assert!(first.is_partial);
    let second = s.run("<test>", "print(1) }", first.pending);
    assert!(second.is_success(), "{second:?}");
    assert_eq!(s.output(), "1\n");
}

#[test]
fn continuation_spans_point_into_the_joined_text() {
    let mut s = session();
    let first = s.run("<test>", "def f() {", None);
    let second = s.run("<test>", "  return missing }", first.pending);
    assert!(second.is_success());
    let Some(error) = s.run("<test>", "f()", None).error else {
        panic!("calling f should fail");
    };
    assert_eq!(error.code, ErrorKind::UnknownIdentifier.code());
    let Some(source) = &error.source else {
        panic!("error without a source");
    };
    assert_eq!(source.snippet(error.span), "missing");
    assert_eq!(error.span.start.line, 1);
}

#[test]
fn several_lines_of_continuation() {
    let mut s = session();
    let mut result = s.run("<test>", "list l :: [1,", None);
    for line in ["2,", "3]"] {
        assert!(result.is_partial);
        result = s.run("<test>", line, result.pending);
    }
    assert!(result.is_success());
    assert_eq!(
        s.lookup("l"),
        Some(Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
    );
}

#[test]
fn complete_runs_report_unclosed_brackets() {
    let mut s = session();
    let result = s.run_complete("<test>", "iterate 5 {");
    assert!(!result.is_partial);
    let Some(error) = result.error else {
        panic!("unclosed bracket should be an error");
    };
    assert_eq!(error.code, ErrorKind::UnmatchedBracket.code());
}

#[test]
fn front_end_errors_carry_their_source() {
    let mut s = session();
    let Some(error) = s.run("<test>", "1 $ 2", None).error else {
        panic!("illegal character should fail");
    };
    assert_eq!(error.code, ErrorKind::IllegalChar.code());
    assert!(error.source.is_some());

    let Some(error) = s.run("<test>", "1 +", None).error else {
        panic!("dangling operator should fail");
    };
    assert_eq!(error.code, ErrorKind::ExpectedExpr.code());
    assert!(error.source.is_some());
}

#[test]
fn pragmas_mute_and_restore_warnings() {
    let mut s = session();
    value(&mut s, "#!nolog\n1 / 0");
    assert!(!s.log_enabled());
    assert!(warning_codes(&s).is_empty());

    value(&mut s, "#!log\n1 / 0");
    assert!(s.log_enabled());
    assert_eq!(warning_codes(&s), vec![WarningKind::DivideByZero.code()]);

    value(&mut s, "#!verbose\n1");
    assert_eq!(warning_codes(&s), vec![WarningKind::UnknownGlobalOpt.code()]);
}

#[test]
fn quiet_sessions_start_muted() {
    let mut s = Session::builder()
        .warnings(WarningOutput::Buffer)
        .print(PrintOutput::Buffer)
        .log(false)
        .build();
    value(&mut s, "1 / 0");
    assert!(s.take_warnings().is_empty());
}

#[test]
fn lexer_warnings_know_their_source() {
    let mut s = session();
    value(&mut s, "str s :: \"open");
    let warnings = s.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, WarningKind::NoStringEnd.code());
    assert!(warnings[0].source.is_some());
}

#[test]
fn host_builtins_are_constants() {
    let mut s = session();
    s.register_builtin(
        "answer",
        Vec::new(),
        |_ctx: &mut CallContext<'_>, _args: &[Value]| -> EvalResult { Ok(Value::Int(42)) },
    );
    assert_eq!(value(&mut s, "answer() + 1"), Value::Int(43));
    assert!(matches!(value(&mut s, "answer :> 1"), Value::Builtin(_)));
}

#[test]
fn rendered_errors_name_the_code_and_line() {
    let mut s = session();
    let Some(error) = s.run("<test>", "int a :: 1\nundefined_thing", None).error else {
        panic!("unknown name should fail");
    };
    let rendered = s.render(&error);
    assert!(rendered.contains("(E022)"), "{rendered}");
    assert!(rendered.contains("Line 2, in <program>"), "{rendered}");
    assert!(rendered.contains("undefined_thing\n^^^^^^^^^^^^^^^"), "{rendered}");
    assert!(rendered.contains("Use 'fck --explain E022' for more details"), "{rendered}");
    assert!(!rendered.contains('\x1b'), "colors were disabled");
}
