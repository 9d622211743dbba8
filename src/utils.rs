//! Assorted helpers shared by the engine and its builder.

/// Default cap on the input array length.
///
/// A visualizer has no use for trees it cannot fit on screen, so the cap is
/// deliberately small. It is a configuration constant, not an algorithmic
/// limit: [`crate::SegmentTreeBuilder::with_max_len`] overrides it per tree.
pub const DEFAULT_MAX_LEN: usize = 16;

/// Number of slots the implicit tree needs for an array of length `n`.
///
/// `4n` is the standard conservative bound for the 1-indexed child relation
/// (`left = 2u`, `right = 2u + 1`) when `n` is not a power of two.
#[inline]
pub fn tree_capacity(n: usize) -> usize {
    4 * n
}
