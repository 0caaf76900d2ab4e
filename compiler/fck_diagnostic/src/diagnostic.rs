//! Core diagnostic type shared by the lexer, parser and evaluator.

use std::fmt;
use std::rc::Rc;

use fck_ir::{SourceFile, Span};

use crate::{ErrorCode, ErrorKind, WarningKind};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// One entry of a runtime traceback: a function that was being called and
/// where it was called from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceFrame {
    /// Display name of the called function (`<anonymous>` for lambdas).
    pub name: String,
    /// Span of the call expression in the caller.
    pub call_span: Span,
}

impl TraceFrame {
    pub fn new(name: impl Into<String>, call_span: Span) -> Self {
        TraceFrame {
            name: name.into(),
            call_span,
        }
    }
}

/// A fault with its code, location and message arguments.
///
/// Runtime faults also carry a traceback, innermost call first. The source
/// is attached by whoever knows which text the span points into: the
/// session for top-level code, the evaluator for function bodies parsed
/// from an earlier input.
#[derive(Clone, PartialEq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub span: Span,
    /// Values for the `{0}`, `{1}`, ... placeholders of the code's template.
    pub args: Vec<String>,
    pub frames: Vec<TraceFrame>,
    pub source: Option<Rc<SourceFile>>,
}

impl Diagnostic {
    fn new(code: ErrorCode, span: Span) -> Self {
        Diagnostic {
            code,
            span,
            args: Vec::new(),
            frames: Vec::new(),
            source: None,
        }
    }

    pub fn error(kind: ErrorKind, span: Span) -> Self {
        Self::new(kind.code(), span)
    }

    pub fn warning(kind: WarningKind, span: Span) -> Self {
        Self::new(kind.code(), span)
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl fmt::Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    #[must_use]
    pub fn with_frames(mut self, frames: Vec<TraceFrame>) -> Self {
        self.frames = frames;
        self
    }

    /// Attach `source` unless a source is already attached.
    #[must_use]
    pub fn with_source(mut self, source: &Rc<SourceFile>) -> Self {
        if self.source.is_none() {
            self.source = Some(Rc::clone(source));
        }
        self
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        if self.code.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// The code's template with the arguments interpolated. Placeholders
    /// without an argument are left as written.
    pub fn message(&self) -> String {
        let template = self.code.template();
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                Some((close, self.args.get(index)?))
            });
            if let Some((close, arg)) = arg {
                out.push_str(arg);
                rest = &after[close + 1..];
            } else {
                out.push('{');
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("code", &self.code)
            .field("span", &self.span)
            .field("args", &self.args)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity(), self.code, self.message())
    }
}

impl std::error::Error for Diagnostic {}

// ─── Parser diagnostic factories ───

/// `Expected an expression, found <found>`.
pub fn expected_expression(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::ExpectedExpr, span).with_arg(found)
}

/// `Unexpected <found>` after a complete statement.
pub fn unexpected_token(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::UnexpectedToken, span).with_arg(found)
}

/// `Bracket <open> has no matching <close>`.
pub fn unmatched_bracket(span: Span, open: &str, close: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::UnmatchedBracket, span)
        .with_arg(format_args!("'{open}'"))
        .with_arg(format_args!("'{close}'"))
}

/// `'<name>' is not defined`.
pub fn unknown_identifier(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorKind::UnknownIdentifier, span).with_arg(name)
}
