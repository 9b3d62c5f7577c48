//! Native stack growth for the evaluator's recursive paths.
//!
//! `walk`, `glom` and `eval` recurse into each other for every nested
//! `<={...}` call, lambda invocation and non-tail thunk. The recursion depth
//! is bounded by the interpreter's `max-eval-depth` setting, not by the
//! size of the thread's stack, so every recursive entry point goes through
//! [`ensure_sufficient_stack`].
//!
//! On native targets the stack is extended with `stacker` once less than
//! [`RED_ZONE`] bytes remain. On `wasm32` the closure is called directly.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn walk(&mut self, tree: &TreeRef, binding: &Binding) -> Result<List, Signal> {
///     ensure_sufficient_stack(|| self.walk_inner(tree, binding))
/// }
/// ```
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

/// Bytes left on the current stack segment, if the platform reports it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
