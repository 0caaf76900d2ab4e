//! Expression nodes.
//!
//! Every construct in fck is an expression: statements, loops and function
//! definitions all produce a value. Children are `ExprId` indices into the
//! owning `ExprArena`; variable-length children live in the arena's side
//! tables behind the range types.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use super::ranges::{
    CallArgRange, CaseArmRange, ExprRange, IfBranchRange, IndexSpecRange, ParamRange,
};
use crate::{AssignOp, Name, Span, TypeKind, VarType};

/// Index of an expression in an `ExprArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for "no expression"; never returned by `alloc_expr`.
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

/// An expression node with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // ─── Literals ───
    Int(i64),
    Float(f64),
    Str(Name),
    List(ExprRange),

    /// Variable access.
    Ident(Name),

    // ─── Postfix ───
    /// `target[spec, ...]`
    Index {
        target: ExprId,
        specs: IndexSpecRange,
    },
    /// `target.attr`
    Attribute {
        target: ExprId,
        attr: Name,
    },
    /// `expr as ty`
    Cast {
        expr: ExprId,
        ty: TypeKind,
    },

    // ─── Operators ───
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `cond ? then : else`. A missing `then` yields the condition's value,
    /// a missing `else` yields null.
    Ternary {
        cond: ExprId,
        then_branch: Option<ExprId>,
        else_branch: Option<ExprId>,
    },

    // ─── Bindings ───
    /// `int x :: value`; without a value the variable takes its type's zero.
    VarDecl {
        ty: VarType,
        name: Name,
        value: Option<ExprId>,
        yields: bool,
    },
    /// `x :: value`, `x :+: value`, `x :+> value`, ...
    Reassign {
        name: Name,
        op: AssignOp,
        value: ExprId,
        yields: bool,
    },

    // ─── Conditionals ───
    /// `if`/`elif` branches in order, then an optional `else` block.
    If {
        branches: IfBranchRange,
        else_branch: Option<ExprId>,
    },
    Case {
        subject: ExprId,
        arms: CaseArmRange,
        default: Option<ExprId>,
    },

    // ─── Loops ───
    Iterate {
        label: Option<Name>,
        start: Option<ExprId>,
        end: ExprId,
        step: Option<ExprId>,
        binding: Option<Name>,
        body: ExprId,
    },
    While {
        label: Option<Name>,
        cond: ExprId,
        body: ExprId,
    },

    // ─── Functions ───
    /// `def name(params) { body }`; anonymous when `name` is `None`.
    FuncDef {
        name: Option<Name>,
        params: ParamRange,
        body: ExprId,
    },
    Call {
        callee: ExprId,
        args: CallArgRange,
    },

    // ─── Control ───
    Return {
        value: Option<ExprId>,
        guard: Option<ExprId>,
    },
    Break {
        label: Option<Name>,
        guard: Option<ExprId>,
    },
    Continue {
        label: Option<Name>,
        guard: Option<ExprId>,
    },

    /// Statement list; evaluates to its last statement's value.
    Block(ExprRange),
}

/// A function parameter: `type name [:: default]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: VarType,
    pub default: Option<ExprId>,
    pub span: Span,
}

/// A call argument, positional or `name :: value`.
#[derive(Clone, Debug, PartialEq)]
pub struct CallArg {
    pub name: Option<Name>,
    pub value: ExprId,
    pub span: Span,
}

/// One entry inside `[...]` after an indexing target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexSpec {
    Single(ExprId),
    /// `start to end`, end exclusive.
    Range { start: ExprId, end: ExprId },
}

/// `if`/`elif` condition and its block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IfBranch {
    pub cond: ExprId,
    pub body: ExprId,
}

/// `option <pattern> { body }` inside a `case`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CaseArm {
    pub pattern: ExprId,
    pub body: ExprId,
}

crate::static_assert_size!(ExprId, 4);
