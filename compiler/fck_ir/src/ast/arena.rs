//! Arena allocation for the flat AST.
//!
//! - Contiguous storage for all expressions of one parse
//! - Child references use `ExprId` indices
//! - Variable-length children live in side tables behind range handles

use std::fmt;
use std::rc::Rc;

use super::expr::{CallArg, CaseArm, Expr, ExprId, IfBranch, IndexSpec, Param};
use super::ranges::{
    CallArgRange, CaseArmRange, ExprRange, IfBranchRange, IndexSpecRange, ParamRange,
};

/// Contiguous storage for the expressions of one parsed input.
#[derive(Clone, Default, PartialEq)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (list literals, blocks).
    expr_lists: Vec<ExprId>,
    params: Vec<Param>,
    call_args: Vec<CallArg>,
    index_specs: Vec<IndexSpec>,
    if_branches: Vec<IfBranch>,
    case_arms: Vec<CaseArm>,
}

/// Convert a side-table length to a range start.
///
/// # Panics
/// Panics if an arena grows past `u32::MAX` entries.
fn to_start(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena exceeded u32::MAX entries"))
}

/// Convert a side-table run length to a range length.
///
/// # Panics
/// Panics if a single list exceeds `u16::MAX` entries.
fn to_len(len: usize) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("list of {len} entries exceeds u16::MAX"))
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 4 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 4;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
            ..Self::default()
        }
    }

    // ─── Expressions ───

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_start(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ─── Expression lists ───

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(exprs);
        ExprRange::new(to_start(start), to_len(self.expr_lists.len() - start))
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.as_range()]
    }

    // ─── Side tables ───

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = self.params.len();
        self.params.extend(params);
        ParamRange::new(to_start(start), to_len(self.params.len() - start))
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        &self.params[range.as_range()]
    }

    pub fn alloc_call_args(&mut self, args: impl IntoIterator<Item = CallArg>) -> CallArgRange {
        let start = self.call_args.len();
        self.call_args.extend(args);
        CallArgRange::new(to_start(start), to_len(self.call_args.len() - start))
    }

    #[inline]
    pub fn get_call_args(&self, range: CallArgRange) -> &[CallArg] {
        &self.call_args[range.as_range()]
    }

    pub fn alloc_index_specs(
        &mut self,
        specs: impl IntoIterator<Item = IndexSpec>,
    ) -> IndexSpecRange {
        let start = self.index_specs.len();
        self.index_specs.extend(specs);
        IndexSpecRange::new(to_start(start), to_len(self.index_specs.len() - start))
    }

    #[inline]
    pub fn get_index_specs(&self, range: IndexSpecRange) -> &[IndexSpec] {
        &self.index_specs[range.as_range()]
    }

    pub fn alloc_if_branches(
        &mut self,
        branches: impl IntoIterator<Item = IfBranch>,
    ) -> IfBranchRange {
        let start = self.if_branches.len();
        self.if_branches.extend(branches);
        IfBranchRange::new(to_start(start), to_len(self.if_branches.len() - start))
    }

    #[inline]
    pub fn get_if_branches(&self, range: IfBranchRange) -> &[IfBranch] {
        &self.if_branches[range.as_range()]
    }

    pub fn alloc_case_arms(&mut self, arms: impl IntoIterator<Item = CaseArm>) -> CaseArmRange {
        let start = self.case_arms.len();
        self.case_arms.extend(arms);
        CaseArmRange::new(to_start(start), to_len(self.case_arms.len() - start))
    }

    #[inline]
    pub fn get_case_arms(&self, range: CaseArmRange) -> &[CaseArm] {
        &self.case_arms[range.as_range()]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("expr_lists", &self.expr_lists.len())
            .field("params", &self.params.len())
            .field("call_args", &self.call_args.len())
            .finish_non_exhaustive()
    }
}

/// Shared, immutable arena handle.
///
/// A function value keeps the arena its body was parsed into alive, so a
/// function defined on one REPL line can still be called after the next
/// line was parsed into a fresh arena.
#[derive(Clone)]
pub struct SharedArena(Rc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Rc::new(arena))
    }

    /// Whether two handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &ExprArena {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedArena({} exprs)", self.0.expr_count())
    }
}
