use std::rc::Rc;

use super::*;
use crate::{ErrorKind, TraceFrame, WarningKind};
use pretty_assertions::assert_eq;

fn render(diagnostic: &Diagnostic, mode: ColorMode) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), mode, false);
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap_or_default()
}

fn source(text: &str) -> Rc<SourceFile> {
    Rc::new(SourceFile::new("<test>", text))
}

#[test]
fn framed_block_without_colors() {
    let src = source("print(a)");
    let span = Span::new(src.position_at(6), src.position_at(7));
    let diag = Diagnostic::error(ErrorKind::UnknownIdentifier, span)
        .with_arg("a")
        .with_source(&src);

    let border = "*".repeat("Use 'fck --explain E022' for more details".len());
    let expected = format!(
        "{border}\n\
         Error: Unknown identifier (E022)\n\
         'a' is not defined\n\
         Traceback (most recent call):\n  Line 1, in <program>\n\
         print(a)\n      ^\n\
         \n\
         Use 'fck --explain E022' for more details\n\
         {border}\n"
    );
    assert_eq!(render(&diag, ColorMode::Never), expected);
}

#[test]
fn traceback_lists_outermost_first() {
    let src = source("def f() { g() }\ndef g() { x }\nf()");
    let fault = Span::new(src.position_at(26), src.position_at(27));
    let call_g = Span::new(src.position_at(10), src.position_at(13));
    let call_f = Span::new(src.position_at(30), src.position_at(33));
    let diag = Diagnostic::error(ErrorKind::UnknownIdentifier, fault)
        .with_arg("x")
        .with_frames(vec![TraceFrame::new("g", call_g), TraceFrame::new("f", call_f)]);

    let out = render(&diag, ColorMode::Never);
    assert!(out.contains(
        "Traceback (most recent call):\n  Line 3, in <program>\n  Line 1, in f\n  Line 2, in g\n"
    ));
}

#[test]
fn multi_line_span_marks_every_line() {
    let src = source("list a :: [1,\n  2]");
    let span = Span::new(src.position_at(10), src.position_at(18));
    let lines = underline(&src, span);
    assert_eq!(
        lines,
        vec![
            "list a :: [1,".to_string(),
            "          ^^^".to_string(),
            "  2]".to_string(),
            "^^^^".to_string(),
        ]
    );
}

#[test]
fn empty_span_gets_one_caret() {
    let src = source("auto x");
    let lines = underline(&src, Span::point(src.position_at(6)));
    assert_eq!(lines, vec!["auto x".to_string(), "      ^".to_string()]);
}

#[test]
fn warnings_use_warning_title_and_colors() {
    let diag = Diagnostic::warning(WarningKind::DivideByZero, Span::DUMMY).with_arg(5);
    let plain = render(&diag, ColorMode::Never);
    assert!(plain.contains("Warning: Divide by zero (W001)"));
    assert!(!plain.contains('\x1b'));

    let colored = render(&diag, ColorMode::Always);
    assert!(colored.contains(colors::WARNING));
    assert!(colored.contains(colors::NAME));
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}
