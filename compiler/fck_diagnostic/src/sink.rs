//! Warning sinks.
//!
//! Warnings never stop evaluation; the stage that detects one hands it to a
//! sink and carries on with the substituted value. Sinks take `&self` so one
//! sink can be shared by the lexer and the evaluator of a session.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

use crate::emitter::{DiagnosticEmitter, TerminalEmitter};
use crate::Diagnostic;

/// Destination for warnings.
pub trait WarningSink {
    fn warn(&self, diagnostic: Diagnostic);
}

/// Collects warnings for later inspection.
#[derive(Default)]
pub struct BufferWarningSink {
    warnings: RefCell<Vec<Diagnostic>>,
}

impl BufferWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl WarningSink for BufferWarningSink {
    fn warn(&self, diagnostic: Diagnostic) {
        self.warnings.borrow_mut().push(diagnostic);
    }
}

/// Drops every warning.
#[derive(Default, Clone, Copy)]
pub struct SilentWarningSink;

impl WarningSink for SilentWarningSink {
    fn warn(&self, _diagnostic: Diagnostic) {}
}

/// Renders warnings immediately through a terminal emitter.
pub struct EmitterWarningSink<W: Write> {
    emitter: RefCell<TerminalEmitter<W>>,
}

impl<W: Write> EmitterWarningSink<W> {
    pub fn new(emitter: TerminalEmitter<W>) -> Self {
        EmitterWarningSink {
            emitter: RefCell::new(emitter),
        }
    }
}

impl<W: Write> WarningSink for EmitterWarningSink<W> {
    fn warn(&self, diagnostic: Diagnostic) {
        let mut emitter = self.emitter.borrow_mut();
        emitter.emit(&diagnostic);
        emitter.flush();
    }
}

/// Forwards to an inner sink unless muted (the `#!nolog` pragma).
pub struct GatedWarningSink {
    inner: Rc<dyn WarningSink>,
    enabled: Cell<bool>,
}

impl GatedWarningSink {
    pub fn new(inner: Rc<dyn WarningSink>) -> Self {
        GatedWarningSink {
            inner,
            enabled: Cell::new(true),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl WarningSink for GatedWarningSink {
    fn warn(&self, diagnostic: Diagnostic) {
        if self.enabled.get() {
            self.inner.warn(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests;
