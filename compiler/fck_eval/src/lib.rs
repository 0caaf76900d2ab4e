//! Tree-walking evaluator for fck.
//!
//! This crate turns a parsed `ExprArena` into values:
//! - `Value`: the runtime values and their conversions
//! - `operators`: binary and unary operator dispatch
//! - `Scope`/`LocalScope`: parent-chained lexical scopes
//! - `Interpreter`: the evaluator, its builder and the builtin call API
//!
//! Fatal faults come back as `EvalError::Fatal(Diagnostic)`. Warnings go to
//! the `WarningSink` the interpreter was built with and evaluation
//! continues.

mod call_stack;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use call_stack::{CallFrame, CallStack};
pub use environment::{AssignError, LocalScope, Scope};
pub use errors::{ControlAction, EvalError, EvalResult};
pub use interpreter::{
    CallContext, Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH,
};
pub use operators::{evaluate_binary, evaluate_unary, Operand};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use value::{
    coerce_for_assignment, zero_value, BuiltinValue, Dividend, FunctionValue, NativeFn,
    NativeParam, Number, Value,
};
