//! Sessions: one interpreter and its surroundings, kept alive across inputs.
//!
//! A session owns the interner, the root scope, the print handler and the
//! warning sinks. Each `run` call lexes, parses and evaluates one input in
//! the same root scope, so a REPL can declare a variable on one line and use
//! it on the next.

use std::io::{self, IsTerminal};
use std::rc::Rc;

use fck_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use fck_diagnostic::sink::{
    BufferWarningSink, EmitterWarningSink, GatedWarningSink, SilentWarningSink,
};
use fck_diagnostic::{Diagnostic, WarningSink};
use fck_eval::{
    buffer_handler, silent_handler, stdout_handler, BuiltinValue, CallContext, ControlAction,
    EvalError, EvalResult, Interpreter, NativeParam, SharedPrintHandler, Value,
    DEFAULT_MAX_CALL_DEPTH,
};
use fck_ir::{
    ExprId, Position, SharedArena, SharedInterner, SourceFile, StringInterner, TokenList,
};
use fck_lexer::GlobalOption;
use tracing::debug;

use crate::builtins;

/// Where warnings go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WarningOutput {
    /// Rendered to stderr as they happen.
    #[default]
    Stderr,
    /// Collected; read them back with `Session::take_warnings`.
    Buffer,
    Silent,
}

/// Where `print`, `log` and REPL echoes go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PrintOutput {
    #[default]
    Stdout,
    /// Captured; read it back with `Session::output`.
    Buffer,
    Silent,
}

/// Session settings.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Name shown for input that does not come from a file.
    pub source_name: String,
    pub warnings: WarningOutput,
    pub print: PrintOutput,
    pub color: ColorMode,
    /// Whether warnings are shown. `#!log` and `#!nolog` flip it at run time.
    pub log: bool,
    /// Nesting limit for calls; `None` disables the check.
    pub max_call_depth: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            source_name: "<stdin>".to_string(),
            warnings: WarningOutput::default(),
            print: PrintOutput::default(),
            color: ColorMode::default(),
            log: true,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }
}

/// Builder for `Session`.
#[derive(Default)]
pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.config.source_name = name.into();
        self
    }

    #[must_use]
    pub fn warnings(mut self, output: WarningOutput) -> Self {
        self.config.warnings = output;
        self
    }

    #[must_use]
    pub fn print(mut self, output: PrintOutput) -> Self {
        self.config.print = output;
        self
    }

    #[must_use]
    pub fn color(mut self, mode: ColorMode) -> Self {
        self.config.color = mode;
        self
    }

    #[must_use]
    pub fn log(mut self, enabled: bool) -> Self {
        self.config.log = enabled;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Session {
        let config = self.config;

        let target = match config.warnings {
            WarningOutput::Stderr => {
                let is_tty = io::stderr().is_terminal();
                WarningTarget::Stderr(Rc::new(EmitterWarningSink::new(TerminalEmitter::stderr(
                    config.color,
                    is_tty,
                ))))
            }
            WarningOutput::Buffer => WarningTarget::Buffer(Rc::new(BufferWarningSink::new())),
            WarningOutput::Silent => WarningTarget::Silent,
        };
        let inner: Rc<dyn WarningSink> = match &target {
            WarningTarget::Stderr(sink) => sink.clone(),
            WarningTarget::Buffer(sink) => sink.clone(),
            WarningTarget::Silent => Rc::new(SilentWarningSink),
        };
        let gate = Rc::new(GatedWarningSink::new(inner));
        gate.set_enabled(config.log);

        let print: SharedPrintHandler = match config.print {
            PrintOutput::Stdout => stdout_handler(),
            PrintOutput::Buffer => buffer_handler(),
            PrintOutput::Silent => silent_handler(),
        };

        let interpreter = Interpreter::builder()
            .interner(SharedInterner::new())
            .print_handler(print)
            .warning_sink(gate.clone())
            .max_call_depth(config.max_call_depth)
            .build();

        debug!(?config, "session created");
        Session {
            interpreter,
            config,
            gate,
            target,
        }
    }
}

/// Concrete sink behind the gate, kept so buffered warnings can be read.
enum WarningTarget {
    Stderr(Rc<EmitterWarningSink<io::Stderr>>),
    Buffer(Rc<BufferWarningSink>),
    Silent,
}

/// Tokens of an input that is still waiting for closing brackets.
#[derive(Clone, Debug)]
pub struct PendingInput {
    /// Everything lexed so far, without the final `Eof`.
    pub tokens: TokenList,
    /// The text those tokens came from.
    pub text: String,
}

/// Outcome of one `Session::run`.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Value of the last statement, when the input ran to completion.
    pub value: Option<Value>,
    pub error: Option<Diagnostic>,
    /// The input has unclosed brackets; pass `pending` back with the next
    /// line.
    pub is_partial: bool,
    pub pending: Option<PendingInput>,
    /// A builtin asked the host to stop with this status.
    pub exit: Option<i32>,
}

impl RunResult {
    fn finished(value: Value) -> Self {
        RunResult {
            value: Some(value),
            ..RunResult::default()
        }
    }

    fn failed(error: Diagnostic) -> Self {
        RunResult {
            error: Some(error),
            ..RunResult::default()
        }
    }

    fn partial(pending: PendingInput) -> Self {
        RunResult {
            is_partial: true,
            pending: Some(pending),
            ..RunResult::default()
        }
    }

    fn exited(code: i32) -> Self {
        RunResult {
            exit: Some(code),
            ..RunResult::default()
        }
    }

    /// Ran to completion without a fatal error.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.is_partial
    }
}

/// A running interpreter plus its configuration.
pub struct Session {
    interpreter: Interpreter,
    config: SessionConfig,
    gate: Rc<GatedWarningSink>,
    target: WarningTarget,
}

impl Default for Session {
    fn default() -> Self {
        Session::builder().build()
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Install the standard builtins: `print`, `log`, `input`, `clear`,
    /// `type`, `len` and `run`.
    #[must_use]
    pub fn with_std_builtins(mut self) -> Self {
        builtins::install_std(&mut self);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Install a native function as a root constant.
    pub fn register_builtin(
        &mut self,
        name: &'static str,
        params: Vec<NativeParam>,
        native: impl Fn(&mut CallContext<'_>, &[Value]) -> EvalResult + 'static,
    ) {
        self.interpreter.register_builtin(BuiltinValue {
            name,
            params,
            native: Box::new(native),
        });
    }

    /// Whether warnings are currently shown.
    pub fn log_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub(crate) fn warning_gate(&self) -> Rc<GatedWarningSink> {
        Rc::clone(&self.gate)
    }

    /// Look up a root-scope name.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.interpreter.lookup(name)
    }

    /// Captured print output, for `PrintOutput::Buffer` sessions.
    pub fn output(&self) -> String {
        self.interpreter.print_handler().get_output()
    }

    /// Drain collected warnings, for `WarningOutput::Buffer` sessions.
    pub fn take_warnings(&self) -> Vec<Diagnostic> {
        match &self.target {
            WarningTarget::Buffer(sink) => sink.take(),
            WarningTarget::Stderr(_) | WarningTarget::Silent => Vec::new(),
        }
    }

    /// Lex, parse and evaluate one input.
    ///
    /// With `pending` set, `text` continues an earlier input that had
    /// unclosed brackets: the two are joined with a newline, and the newline
    /// plus the new text are lexed. Nothing is evaluated until the brackets balance, so a
    /// multi-line entry runs exactly once.
    pub fn run(
        &mut self,
        source_name: &str,
        text: &str,
        pending: Option<PendingInput>,
    ) -> RunResult {
        self.run_input(source_name, text, pending, true)
    }

    /// Run a complete input, such as a script file. Unclosed brackets are
    /// reported as errors instead of waiting for more text.
    pub fn run_complete(&mut self, source_name: &str, text: &str) -> RunResult {
        self.run_input(source_name, text, None, false)
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, text, pending),
        fields(continued = pending.is_some())
    )]
    fn run_input(
        &mut self,
        source_name: &str,
        text: &str,
        pending: Option<PendingInput>,
        allow_partial: bool,
    ) -> RunResult {
        let (source, start, prefix) = match pending {
            Some(pending) => {
                let source = Rc::new(SourceFile::new(
                    source_name,
                    format!("{}\n{text}", pending.text),
                ));
                // Start at the joining newline: it ends the pending line's
                // last statement.
                let start = source.position_at(pending.text.len());
                (source, start, Some(pending.tokens))
            }
            None => (
                Rc::new(SourceFile::new(source_name, text)),
                Position::START,
                None,
            ),
        };

        let tokens = match lex(&source, start, self.interpreter.interner(), &self.gate) {
            Ok(tokens) => tokens,
            Err(error) => return RunResult::failed(error),
        };
        let mut tokens = match prefix {
            Some(mut prefix) => {
                prefix.extend(tokens);
                prefix
            }
            None => tokens,
        };

        if allow_partial && tokens.bracket_depth() > 0 {
            debug!(depth = tokens.bracket_depth(), "waiting for closing brackets");
            tokens.strip_eof();
            return RunResult::partial(PendingInput {
                tokens,
                text: source.text().to_string(),
            });
        }

        let (arena, root) =
            match parse_tokens(&tokens, &source, self.interpreter.interner(), &*self.gate) {
                Ok(parsed) => parsed,
                Err(error) => return RunResult::failed(error),
            };

        match self.interpreter.eval_program(arena, root, source) {
            Ok(value) => RunResult::finished(value),
            Err(EvalError::Fatal(error)) => RunResult::failed(error),
            Err(EvalError::Control(ControlAction::Exit(code))) => RunResult::exited(code),
            Err(EvalError::Control(action)) => {
                debug!(?action, "control signal reached the top level");
                RunResult::finished(Value::Null)
            }
        }
    }

    /// Render a diagnostic the way the terminal would show it.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), self.config.color, false);
        emitter.emit(diagnostic);
        emitter.flush();
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }

    /// Render a diagnostic to stderr.
    pub fn report(&self, diagnostic: &Diagnostic) {
        let is_tty = io::stderr().is_terminal();
        let mut emitter = TerminalEmitter::stderr(self.config.color, is_tty);
        emitter.emit(diagnostic);
        emitter.flush();
    }
}

/// Attaches the input being lexed to warnings that lack a source.
struct SourceAttached<'a> {
    inner: &'a dyn WarningSink,
    source: &'a Rc<SourceFile>,
}

impl WarningSink for SourceAttached<'_> {
    fn warn(&self, diagnostic: Diagnostic) {
        self.inner.warn(diagnostic.with_source(self.source));
    }
}

/// Lex from `start` and apply the pragmas found.
fn lex(
    source: &Rc<SourceFile>,
    start: Position,
    interner: &StringInterner,
    gate: &GatedWarningSink,
) -> Result<TokenList, Diagnostic> {
    let sink = SourceAttached {
        inner: gate,
        source,
    };
    let output = fck_lexer::lex(source, start, interner, &sink)
        .map_err(|error| error.with_source(source))?;
    for option in &output.options {
        match option {
            GlobalOption::Log(enabled) => gate.set_enabled(*enabled),
        }
    }
    Ok(output.tokens)
}

fn parse_tokens(
    tokens: &TokenList,
    source: &Rc<SourceFile>,
    interner: &StringInterner,
    sink: &dyn WarningSink,
) -> Result<(SharedArena, ExprId), Diagnostic> {
    let parsed = fck_parse::parse(tokens, interner);
    for warning in parsed.warnings {
        sink.warn(warning.with_source(source));
    }
    if let Some(error) = parsed.error {
        return Err(error.with_source(source));
    }
    Ok((SharedArena::new(parsed.arena), parsed.root))
}

/// Lex and parse a complete source, as the `run` builtin does for a file.
pub(crate) fn compile(
    source: &Rc<SourceFile>,
    interner: &StringInterner,
    gate: &GatedWarningSink,
) -> Result<(SharedArena, ExprId), Diagnostic> {
    let tokens = lex(source, Position::START, interner, gate)?;
    parse_tokens(&tokens, source, interner, gate)
}

#[cfg(test)]
mod tests;
