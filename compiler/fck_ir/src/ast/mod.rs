//! Flat AST for fck.
//!
//! # Architecture
//!
//! - `expr`: `Expr`, `ExprKind` and the side-table entry types
//! - `operators`: `BinaryOp`, `UnaryOp`
//! - `ranges`: compact range handles into the arena's side tables
//! - `arena`: `ExprArena` storage and the `SharedArena` handle

mod arena;
mod expr;
mod operators;
mod ranges;

pub use arena::{ExprArena, SharedArena};
pub use expr::{CallArg, CaseArm, Expr, ExprId, ExprKind, IfBranch, IndexSpec, Param};
pub use operators::{BinaryOp, UnaryOp};
pub use ranges::{CallArgRange, CaseArmRange, ExprRange, IfBranchRange, IndexSpecRange, ParamRange};
