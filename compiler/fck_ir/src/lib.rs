//! fck IR - shared data structures for the fck interpreter
//!
//! This crate contains the types every stage of the pipeline agrees on:
//! - Positions and spans for source locations
//! - `SourceFile` for line lookup and snippets
//! - Names for interned identifiers and string literals
//! - Tokens and `TokenList` for lexer output
//! - AST nodes stored in a flat `ExprArena`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Copy Positions**: a `Span` is two `Copy` positions, never shared

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod source;
mod span;
mod token;

pub use ast::{
    BinaryOp, CallArg, CallArgRange, CaseArm, CaseArmRange, Expr, ExprArena, ExprId, ExprKind,
    ExprRange, IfBranch, IfBranchRange, IndexSpec, IndexSpecRange, Param, ParamRange,
    SharedArena, UnaryOp,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use source::SourceFile;
pub use span::{Position, Span};
pub use token::{AssignOp, Keyword, Token, TokenKind, TokenList, TypeKind, VarType};
