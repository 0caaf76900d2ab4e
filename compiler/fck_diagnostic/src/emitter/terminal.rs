//! Terminal Emitter
//!
//! Renders a diagnostic as a framed block:
//!
//! ```text
//! ****************************************
//! Error: Unknown identifier (E022)
//! 'a' is not defined
//! Traceback (most recent call):
//!   Line 1, in <program>
//! print(a)
//!       ^
//!
//! Use 'fck --explain E022' for more details
//! ****************************************
//! ```

use std::io::{self, Write};

use fck_ir::{SourceFile, Span};

use super::DiagnosticEmitter;
use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NAME: &str = "\x1b[35m"; // Magenta
    pub const RESET: &str = "\x1b[0m";
}

/// Display name of top-level code in tracebacks.
pub const PROGRAM_NAME: &str = "<program>";

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// For `Auto` mode, `is_tty` decides; it is ignored otherwise.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is only consulted for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Recover the writer, e.g. the byte buffer in tests.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colors {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let severity = diagnostic.severity();
        let frame_color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };

        let code = diagnostic.code;
        let title_plain = format!("{severity}: {} ({code})", code.title());
        let title = format!(
            "{severity}: {} ({code})",
            self.paint(code.title(), colors::NAME)
        );

        let mut body = vec![diagnostic.message()];
        body.push("Traceback (most recent call):".to_string());
        body.extend(traceback_lines(diagnostic));
        if let Some(source) = &diagnostic.source {
            body.extend(underline(source, diagnostic.span));
        }
        let hint = format!("Use 'fck --explain {code}' for more details");

        let width = std::iter::once(&title_plain)
            .chain(body.iter())
            .chain(std::iter::once(&hint))
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let border = self.paint(&"*".repeat(width), frame_color);

        let _ = writeln!(self.writer, "{border}");
        let _ = writeln!(self.writer, "{title}");
        for line in &body {
            let _ = writeln!(self.writer, "{line}");
        }
        let _ = writeln!(self.writer);
        let _ = writeln!(self.writer, "{hint}");
        let _ = writeln!(self.writer, "{border}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Traceback lines, outermost call first.
///
/// The innermost line points at the fault itself; every other line points
/// at the call site that entered the next frame.
fn traceback_lines(diagnostic: &Diagnostic) -> Vec<String> {
    let frames = &diagnostic.frames;
    let mut lines = Vec::with_capacity(frames.len() + 1);

    let innermost = frames.first().map_or(PROGRAM_NAME, |f| f.name.as_str());
    lines.push(format_frame(diagnostic.span.start.line, innermost));
    for (i, frame) in frames.iter().enumerate() {
        let caller = frames.get(i + 1).map_or(PROGRAM_NAME, |f| f.name.as_str());
        lines.push(format_frame(frame.call_span.start.line, caller));
    }

    lines.reverse();
    lines
}

fn format_frame(line: u32, name: &str) -> String {
    format!("  Line {}, in {name}", line + 1)
}

/// Source lines covered by `span`, each followed by a `^` marker line.
fn underline(source: &SourceFile, span: Span) -> Vec<String> {
    let first = span.start.line as usize;
    let last = (span.end.line as usize).max(first);
    let mut out = Vec::new();

    for index in first..=last {
        let Some(text) = source.line(index) else {
            break;
        };
        let width = text.chars().count();
        let from = if index == first {
            span.start.column as usize
        } else {
            0
        };
        let to = if index == last && span.end.line as usize == last {
            span.end.column as usize
        } else {
            width
        };
        if index > first && to == 0 {
            break;
        }
        let carets = to.saturating_sub(from).max(1);
        out.push(text.to_string());
        out.push(format!("{}{}", " ".repeat(from), "^".repeat(carets)));
    }
    out
}

#[cfg(test)]
mod tests;
