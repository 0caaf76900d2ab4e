//! Stack growth for deep recursion.
//!
//! The parser descends once per nesting level of brackets and operators, and
//! the evaluator once per nested expression and per fck function call. A
//! recursive fck function therefore recurses natively too. Every recursive
//! entry point runs through [`ensure_sufficient_stack`], which moves onto a
//! freshly allocated segment when the current one is nearly exhausted.
//!
//! On `wasm32` the call is a plain passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
