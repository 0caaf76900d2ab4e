use std::io::Write as _;

use fck_diagnostic::{ErrorCode, ErrorKind};
use fck_eval::Value;
use pretty_assertions::assert_eq;

use crate::{PrintOutput, RunResult, Session, WarningOutput};

fn session() -> Session {
    Session::builder()
        .print(PrintOutput::Buffer)
        .warnings(WarningOutput::Buffer)
        .build()
        .with_std_builtins()
}

fn run(session: &mut Session, text: &str) -> RunResult {
    session.run("<test>", text, None)
}

fn value(session: &mut Session, text: &str) -> Value {
    let result = run(session, text);
    if let Some(error) = &result.error {
        panic!("{text:?} failed: {error}");
    }
    result.value.unwrap_or(Value::Null)
}

fn error_code(session: &mut Session, text: &str) -> ErrorCode {
    match run(session, text).error {
        Some(error) => error.code,
        None => panic!("{text:?} should fail"),
    }
}

#[test]
fn print_uses_the_display_form_and_skips_null() {
    let mut s = session();
    value(&mut s, "print(\"hi\")\nprint(null)\nprint()\nprint([1, \"a\"])\nprint(true)");
    assert_eq!(s.output(), "hi\n[1, \"a\"]\ntrue\n");
}

#[test]
fn log_uses_the_debug_form() {
    let mut s = session();
    value(&mut s, "log(\"hi\")\nlog(null)\nlog(2.0)");
    assert_eq!(s.output(), "\"hi\"\nnull\n2.0\n");
}

#[test]
fn type_and_len() {
    let mut s = session();
    assert_eq!(value(&mut s, "type(1.5)"), Value::string("float"));
    assert_eq!(value(&mut s, "type([])"), Value::string("list"));
    assert_eq!(value(&mut s, "type(print)"), Value::string("function"));
    assert_eq!(value(&mut s, "len(\"abc\")"), Value::Int(3));
    assert_eq!(value(&mut s, "len([1, [2, 3]])"), Value::Int(2));
    assert_eq!(error_code(&mut s, "len(5)"), ErrorKind::IllegalValueType.code());
    assert_eq!(error_code(&mut s, "type()"), ErrorKind::TooArgument.code());
}

#[test]
fn clear_empties_captured_output() {
    let mut s = session();
    value(&mut s, "print(1)\nclear()\nprint(2)");
    assert_eq!(s.output(), "2\n");
}

#[test]
fn run_executes_a_script_in_the_same_session() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("lib.fck");
    let mut file = std::fs::File::create(&path).unwrap_or_else(|e| panic!("create: {e}"));
    writeln!(file, "int shared :: 7\ndef twice(int n) {{ return n * 2 }}\nprint(\"loaded\")")
        .unwrap_or_else(|e| panic!("write: {e}"));

    let mut s = session();
    let call = format!("run(\"{}\")\ntwice(shared)", path.display());
    assert_eq!(value(&mut s, &call), Value::Int(14));
    assert_eq!(s.output(), "loaded\n");
    assert_eq!(s.lookup("shared"), Some(Value::Int(7)));
}

#[test]
fn run_reports_script_errors_against_the_script() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("broken.fck");
    std::fs::write(&path, "int ok :: 1\nok + nothing").unwrap_or_else(|e| panic!("write: {e}"));

    let mut s = session();
    let Some(error) = run(&mut s, &format!("run(\"{}\")", path.display())).error else {
        panic!("the script should fail");
    };
    assert_eq!(error.code, ErrorKind::UnknownIdentifier.code());
    let Some(source) = &error.source else {
        panic!("error without a source");
    };
    assert_eq!(source.name(), path.display().to_string());
}

#[test]
fn run_of_a_missing_file_is_an_argument_error() {
    let mut s = session();
    assert_eq!(
        error_code(&mut s, "run(\"/definitely/not/here.fck\")"),
        ErrorKind::IllegalArgumentValue.code()
    );
}

#[test]
fn quit_is_only_there_when_installed() {
    let mut s = session();
    assert_eq!(error_code(&mut s, "quit()"), ErrorKind::UnknownIdentifier.code());

    super::install_quit(&mut s);
    assert_eq!(run(&mut s, "quit()").exit, Some(0));
    let result = run(&mut s, "print(1)\nquit(3)\nprint(2)");
    assert_eq!(result.exit, Some(3));
    assert_eq!(s.output(), "1\n");
    assert_eq!(
        error_code(&mut s, "quit(9999999999)"),
        ErrorKind::IllegalArgumentValue.code()
    );
}
