use pretty_assertions::assert_eq;

use super::*;
use crate::{builtins, PrintOutput, WarningOutput};

fn session() -> Session {
    let mut session = Session::builder()
        .print(PrintOutput::Buffer)
        .warnings(WarningOutput::Buffer)
        .build()
        .with_std_builtins();
    builtins::install_quit(&mut session);
    session
}

/// Feed `input` to the loop; returns the exit status and the prompts shown.
fn drive(session: &mut Session, input: &str) -> (i32, String) {
    let mut prompts = Vec::new();
    let code = run_repl(session, input.as_bytes(), &mut prompts)
        .unwrap_or_else(|e| panic!("repl failed: {e}"));
    (code, String::from_utf8_lossy(&prompts).into_owned())
}

#[test]
fn values_are_echoed_and_null_is_not() {
    let mut s = session();
    let (code, prompts) = drive(&mut s, "int x :> 5\nprint(\"hi\")\n\"text\"\n");
    assert_eq!(code, 0);
    assert_eq!(prompts, ">>> >>> >>> >>> \n");
    assert_eq!(s.output(), "5\nhi\n\"text\"\n");
}

#[test]
fn continuation_lines_switch_the_prompt() {
    let mut s = session();
    let (_, prompts) = drive(&mut s, "iterate 2 {\nprint(1)\n}\nprint(2)\n");
    assert_eq!(prompts, ">>> ... ... >>> >>> \n");
    assert_eq!(s.output(), "1\n1\n2\n");
}

#[test]
fn multi_line_definitions_keep_their_statements_apart() {
    let mut s = session();
    let (code, prompts) = drive(
        &mut s,
        "def add(int a, int b) {\nint sum :: a + b\nreturn sum\n}\nprint(add(1, 2))\n",
    );
    assert_eq!(code, 0);
    assert_eq!(prompts, ">>> ... ... ... >>> >>> \n");
    assert_eq!(s.output(), "<function add>\n3\n");
}

#[test]
fn errors_do_not_end_the_session() {
    let mut s = session();
    let (code, _) = drive(&mut s, "nope\nprint(\"still here\")\n");
    assert_eq!(code, 0);
    assert_eq!(s.output(), "still here\n");
}

#[test]
fn quit_ends_the_loop_with_its_status() {
    let mut s = session();
    let (code, prompts) = drive(&mut s, "quit(4)\nprint(1)\n");
    assert_eq!(code, 4);
    assert_eq!(prompts, ">>> ");
    assert_eq!(s.output(), "");
}

#[test]
fn unfinished_entry_at_end_of_input_is_dropped() {
    let mut s = session();
    let (code, prompts) = drive(&mut s, "iterate 3 {\nprint(1)\n");
    assert_eq!(code, 0);
    assert_eq!(prompts, ">>> ... ... \n");
    assert_eq!(s.output(), "");
}
