use super::*;
use crate::emitter::ColorMode;
use crate::{ErrorCode, WarningKind};
use fck_ir::{SourceFile, Span};

#[test]
fn buffer_collects_and_drains() {
    let sink = BufferWarningSink::new();
    sink.warn(Diagnostic::warning(WarningKind::ModByZero, Span::DUMMY));
    sink.warn(Diagnostic::warning(WarningKind::DivideByZero, Span::DUMMY));
    assert_eq!(sink.len(), 2);

    let codes: Vec<_> = sink.take().into_iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::W002, ErrorCode::W001]);
    assert!(sink.is_empty());
}

#[test]
fn gate_mutes_and_unmutes() {
    let buffer = Rc::new(BufferWarningSink::new());
    let gate = GatedWarningSink::new(buffer.clone());

    gate.set_enabled(false);
    assert!(!gate.is_enabled());
    gate.warn(Diagnostic::warning(WarningKind::ModByZero, Span::DUMMY));
    assert!(buffer.is_empty());

    gate.set_enabled(true);
    gate.warn(Diagnostic::warning(WarningKind::ModByZero, Span::DUMMY));
    assert_eq!(buffer.len(), 1);
}

#[test]
fn emitter_sink_renders_immediately() {
    let sink = EmitterWarningSink::new(TerminalEmitter::with_color_mode(
        Vec::new(),
        ColorMode::Never,
        false,
    ));
    let source = Rc::new(SourceFile::new("<test>", "5 % 0"));
    let span = Span::new(source.position_at(0), source.position_at(5));
    sink.warn(
        Diagnostic::warning(WarningKind::ModByZero, span)
            .with_arg(5)
            .with_source(&source),
    );

    let output = String::from_utf8(sink.emitter.into_inner().into_inner()).unwrap_or_default();
    assert!(output.contains("Warning: Modulo by zero (W002)"));
    assert!(output.contains("5 % 0\n^^^^^"));
}

#[test]
fn silent_sink_drops() {
    SilentWarningSink.warn(Diagnostic::warning(WarningKind::ModByZero, Span::DUMMY));
}
