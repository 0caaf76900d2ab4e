//! The fck interpreter driver.
//!
//! Wires the pipeline together and keeps state between inputs:
//!
//! ```text
//! source text ──► fck_lexer::lex ──► TokenList
//!                       │ unbalanced brackets? ──► PendingInput (REPL continuation)
//!                       ▼
//!                 fck_parse::parse ──► ExprArena + root Block
//!                       ▼
//!                 Interpreter::eval_program ──► Value
//! ```
//!
//! `Session` is the host API (`run`, `register_builtin`); the `fck` binary
//! adds the command line and the REPL on top.

pub mod builtins;
pub mod cli;
pub mod commands;
mod error;
pub mod repl;
mod session;
pub mod tracing_setup;

pub use error::DriverError;
pub use session::{
    PendingInput, PrintOutput, RunResult, Session, SessionBuilder, SessionConfig, WarningOutput,
};
