//! `InterpreterBuilder` for creating `Interpreter` instances.

use std::rc::Rc;

use fck_diagnostic::sink::SilentWarningSink;
use fck_diagnostic::WarningSink;
use fck_ir::{ExprArena, SharedArena, SharedInterner, SourceFile};

use super::Interpreter;
use crate::call_stack::CallStack;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::{LocalScope, Scope, Value};

/// Call depth allowed when the host sets no limit of its own.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for `Interpreter`.
///
/// Defaults: a private interner, stdout output, warnings discarded and
/// `DEFAULT_MAX_CALL_DEPTH`.
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    sink: Option<Rc<dyn WarningSink>>,
    max_call_depth: Option<usize>,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            interner: None,
            print_handler: None,
            sink: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }

    /// Share an interner with the lexer and parser. Programs must be parsed
    /// with the same interner the interpreter uses.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn warning_sink(mut self, sink: Rc<dyn WarningSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter with `true`, `false` and `null` defined.
    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_default();

        let mut root = Scope::new();
        root.set_constant(interner.intern("true"), Value::Bool(true));
        root.set_constant(interner.intern("false"), Value::Bool(false));
        root.set_constant(interner.intern("null"), Value::Null);
        let globals = LocalScope::new(root);

        Interpreter {
            arena: SharedArena::new(ExprArena::new()),
            source: Rc::new(SourceFile::new("<program>", "")),
            env: globals.clone(),
            globals,
            sink: self.sink.unwrap_or_else(|| Rc::new(SilentWarningSink)),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
            function_depth: 0,
            interner,
        }
    }
}
