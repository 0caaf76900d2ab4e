//! Error and warning model for the fck interpreter.
//!
//! - Stable codes (`E001`..., `W001`...) for searchability and `--explain`
//! - A message template per code, filled from the diagnostic's arguments
//! - Primary span, plus a traceback for runtime faults
//!
//! Fatal errors travel as `Result<_, Diagnostic>` and end the current input.
//! Warnings go to a `WarningSink` and evaluation continues.
//!
//! # Architecture
//!
//! - `error_code`: `ErrorCode`, `ErrorKind`, `WarningKind` and their catalog
//! - `errors`: embedded `--explain` documentation
//! - `diagnostic`: `Diagnostic`, `TraceFrame` and factory functions
//! - `sink`: warning sinks (buffer, silent, emitter, gated)
//! - `emitter`: terminal rendering

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod sink;

pub use diagnostic::{
    expected_expression, unexpected_token, unknown_identifier, unmatched_bracket, Diagnostic,
    Severity, TraceFrame,
};
pub use error_code::{ErrorCode, ErrorKind, WarningKind};
pub use errors::ErrorDocs;
pub use sink::WarningSink;
