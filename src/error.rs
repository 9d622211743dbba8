//! Error taxonomy for the engine.
//!
//! Every failure here is an input/programming error surfaced immediately to
//! the caller; the engine performs no I/O and has no transient failure modes,
//! so nothing is ever retried or swallowed. The rendering layer owns any
//! user-facing message text.

use thiserror::Error;

/// Rejected construction input. The tree is never partially built: on any of
/// these the caller must re-validate and call [`SegmentTree::build`] again.
///
/// [`SegmentTree::build`]: crate::SegmentTree::build
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The input array was empty.
    #[error("input array is empty")]
    Empty,

    /// The input array exceeded the configured maximum length.
    #[error("input array has {len} elements, maximum is {max}")]
    TooLong { len: usize, max: usize },

    /// An element was NaN or infinite.
    #[error("element at index {index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },
}

/// Query/update parameters violating `0 <= l <= r <= n-1`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// `l > r`.
    #[error("inverted range: l = {l} > r = {r}")]
    Inverted { l: usize, r: usize },

    /// One of the bounds falls outside `[0, len - 1]`.
    #[error("range [{l}, {r}] is out of bounds for an array of length {len}")]
    OutOfBounds { l: usize, r: usize, len: usize },
}
