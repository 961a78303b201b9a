//! Native stack growth for the recursive evaluator.
//!
//! The evaluator recurses once per nested expression and several times per
//! Lox call, so a deeply recursive script exhausts the default thread stack
//! long before the interpreter's own call-depth limit is reached. Wrapping the
//! recursive entry points in [`grow`] moves evaluation onto a freshly
//! allocated stack segment whenever the current one runs low.
//!
//! On `wasm32` there is no segment switching and [`grow`] simply calls the
//! closure.

/// Space that must remain on the current segment before it is considered
/// low.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if less than the red zone
/// is left on the current one.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn grow<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes left on the current segment, when the platform can tell.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests;
