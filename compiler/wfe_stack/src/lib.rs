//! Stack growth for recursive tree walks.
//!
//! Expression trees are walked recursively, one native frame per nesting
//! level. Workflow files can embed arbitrarily nested expressions such as
//! `!!!!!!...x` or `f(f(f(...)))`, so every recursive step goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand instead of
//! overflowing it.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker::maybe_grow` allocates a new stack segment
//!   when the remaining space drops below the red zone.
//! - **WASM targets**: plain call; the runtime manages its own stack.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn depth(node: NodeRef<'_>) -> usize {
///     ensure_sufficient_stack(|| {
///         1 + node.children().map(depth).max().unwrap_or(0)
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version, calls `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
