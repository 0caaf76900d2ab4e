//! Diagnostic emitters.
//!
//! Each emitter implements `DiagnosticEmitter`. The terminal emitter is the
//! one the driver uses for both fatal errors and warnings.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Flush any buffered output.
    fn flush(&mut self);
}
