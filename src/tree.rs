//! The segment-tree engine.
//!
//! One canonical recursive implementation of build, range-additive update
//! with lazy propagation, and range aggregate query (sum/min/max). Every
//! operation records the nodes its recursion visits into a
//! [`TraversalLog`], which is what an external renderer replays to animate
//! the structure; the engine itself knows nothing about presentation.
//!
//! Layout is the standard array-backed implicit tree: the root is slot 1,
//! node `u` has children `2u` and `2u + 1`, and `4n` slots are enough for
//! any `n`, power of two or not.

use crate::error::{BuildError, RangeError};
use crate::trace::{Aggregate, NodeSnapshot, TraversalLog, VisitKind};
use crate::utils::{tree_capacity, DEFAULT_MAX_LEN};

/// One slot of the implicit tree: the three aggregates plus the pending
/// additive delta not yet pushed to the children.
#[derive(Debug, Clone, Copy, Default)]
struct Node {
    sum: f64,
    min: f64,
    max: f64,
    lazy: f64,
}

impl Node {
    fn leaf(value: f64) -> Self {
        Self {
            sum: value,
            min: value,
            max: value,
            lazy: 0.0,
        }
    }
}

/// Result of [`SegmentTree::query_range`]: the merged aggregate over the
/// requested range and the traversal that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub result: Aggregate,
    pub log: TraversalLog,
}

/// Segment tree over a fixed-length array of finite numbers, supporting
/// range-additive updates and sum/min/max range queries, both in
/// `O(log n)`.
///
/// A tree is built once from an input array and never resized; when the
/// underlying array changes, discard the tree and build a new one. Updates
/// mutate the tree's logical view of the array, never the caller's array.
///
/// There is no internal locking: a host that wants to visualize one
/// logical tree in two places must hold two instances or serialize access.
#[derive(Debug, Clone)]
pub struct SegmentTree {
    len: usize,
    max_len: usize,
    nodes: Vec<Node>,
    build_log: TraversalLog,
}

impl SegmentTree {
    /// Build a tree over `values` with the default length cap
    /// ([`DEFAULT_MAX_LEN`]).
    ///
    /// Rejects empty input, input longer than the cap, and non-finite
    /// elements; inputs are never silently clamped.
    pub fn build(values: &[f64]) -> Result<Self, BuildError> {
        Self::with_max_len(values, DEFAULT_MAX_LEN)
    }

    pub(crate) fn with_max_len(values: &[f64], max_len: usize) -> Result<Self, BuildError> {
        if values.is_empty() {
            return Err(BuildError::Empty);
        }
        if values.len() > max_len {
            return Err(BuildError::TooLong {
                len: values.len(),
                max: max_len,
            });
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(BuildError::NonFinite { index, value });
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("build", n = values.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let len = values.len();
        let mut tree = Self {
            len,
            max_len,
            nodes: vec![Node::default(); tree_capacity(len)],
            build_log: TraversalLog::new(),
        };
        let mut log = TraversalLog::new();
        tree.build_node(values, 1, 0, len - 1, &mut log);
        tree.build_log = log;
        Ok(tree)
    }

    /// Length of the underlying array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: zero-length input is rejected at build time.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The length cap this tree was built under.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The traversal recorded while building: leaves as fully covered
    /// terminals, internal merge points as partially covered.
    pub fn build_log(&self) -> &TraversalLog {
        &self.build_log
    }

    /// Add `delta` to every element of the inclusive range `[l, r]`.
    ///
    /// Lazy tags may remain un-pushed below the recursion's turning points
    /// afterwards; every node above them already reflects the delta, so any
    /// subsequent query observes the update.
    pub fn update_range(
        &mut self,
        l: usize,
        r: usize,
        delta: f64,
    ) -> Result<TraversalLog, RangeError> {
        self.check_range(l, r)?;

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("update_range", l, r, delta);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut log = TraversalLog::new();
        self.update_node(1, 0, self.len - 1, l, r, delta, &mut log);
        Ok(log)
    }

    /// Aggregate `{sum, min, max}` over the inclusive range `[l, r]`.
    ///
    /// Takes `&mut self` because the descent pushes pending lazy tags down
    /// to the children it visits; the logical value of every element is
    /// unchanged.
    pub fn query_range(&mut self, l: usize, r: usize) -> Result<QueryOutcome, RangeError> {
        self.check_range(l, r)?;

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("query_range", l, r);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut log = TraversalLog::new();
        let result = self.query_node(1, 0, self.len - 1, l, r, &mut log);
        Ok(QueryOutcome { result, log })
    }

    /// Snapshot of node `u`, or `None` if `u` is not a slot the recursion
    /// over this tree's length ever occupies.
    pub fn node_snapshot(&self, u: usize) -> Option<NodeSnapshot> {
        let (start, end) = self.node_range(u)?;
        Some(self.snapshot(u, start, end))
    }

    fn check_range(&self, l: usize, r: usize) -> Result<(), RangeError> {
        if l > r {
            return Err(RangeError::Inverted { l, r });
        }
        if r >= self.len {
            return Err(RangeError::OutOfBounds {
                l,
                r,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Walk the bits of `u` below its leading one to recover the range the
    /// recursion assigns to that slot.
    fn node_range(&self, u: usize) -> Option<(usize, usize)> {
        if u == 0 {
            return None;
        }
        let mut start = 0;
        let mut end = self.len - 1;
        let depth = usize::BITS - 1 - u.leading_zeros();
        for bit in (0..depth).rev() {
            if start == end {
                // Descending past a leaf: no such slot.
                return None;
            }
            let mid = start + (end - start) / 2;
            if (u >> bit) & 1 == 0 {
                end = mid;
            } else {
                start = mid + 1;
            }
        }
        Some((start, end))
    }

    fn snapshot(&self, u: usize, start: usize, end: usize) -> NodeSnapshot {
        let node = &self.nodes[u];
        NodeSnapshot {
            sum: node.sum,
            min: node.min,
            max: node.max,
            lazy: node.lazy,
            range: (start, end),
        }
    }

    /// Fold `delta` into `u`'s own aggregates. A non-leaf defers the delta
    /// to its children through its lazy tag; a leaf has nobody to defer to,
    /// so the fold is already complete.
    fn apply_delta(&mut self, u: usize, start: usize, end: usize, delta: f64) {
        let span = (end - start + 1) as f64;
        let node = &mut self.nodes[u];
        node.sum += delta * span;
        node.min += delta;
        node.max += delta;
        if start != end {
            node.lazy += delta;
        }
    }

    /// Flush `u`'s pending delta into both children and clear it. A no-op
    /// when nothing is pending, so calling it twice in a row is safe.
    fn push_down(&mut self, u: usize, start: usize, end: usize) {
        debug_assert!(start != end, "push_down on a leaf");
        let pending = self.nodes[u].lazy;
        if pending == 0.0 {
            return;
        }
        let mid = start + (end - start) / 2;
        self.apply_delta(2 * u, start, mid, pending);
        self.apply_delta(2 * u + 1, mid + 1, end, pending);
        self.nodes[u].lazy = 0.0;
    }

    /// Recompute `u`'s aggregates from its two (up-to-date) children.
    fn push_up(&mut self, u: usize) {
        let left = self.nodes[2 * u];
        let right = self.nodes[2 * u + 1];
        let node = &mut self.nodes[u];
        node.sum = left.sum + right.sum;
        node.min = left.min.min(right.min);
        node.max = left.max.max(right.max);
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, values, log))
    )]
    fn build_node(
        &mut self,
        values: &[f64],
        u: usize,
        start: usize,
        end: usize,
        log: &mut TraversalLog,
    ) {
        if start == end {
            self.nodes[u] = Node::leaf(values[start]);
            log.record(u, VisitKind::FullyCovered, self.snapshot(u, start, end));
            return;
        }
        let at = log.open(u, self.snapshot(u, start, end));
        let mid = start + (end - start) / 2;
        self.build_node(values, 2 * u, start, mid, log);
        self.build_node(values, 2 * u + 1, mid + 1, end, log);
        self.push_up(u);
        log.close(at, self.snapshot(u, start, end));
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self, log)))]
    #[allow(clippy::too_many_arguments)]
    fn update_node(
        &mut self,
        u: usize,
        start: usize,
        end: usize,
        l: usize,
        r: usize,
        delta: f64,
        log: &mut TraversalLog,
    ) {
        if r < start || end < l {
            log.record(u, VisitKind::Disjoint, self.snapshot(u, start, end));
            return;
        }
        if start != end {
            self.push_down(u, start, end);
        }
        if l <= start && end <= r {
            self.apply_delta(u, start, end, delta);
            log.record(u, VisitKind::FullyCovered, self.snapshot(u, start, end));
            return;
        }
        let at = log.open(u, self.snapshot(u, start, end));
        let mid = start + (end - start) / 2;
        self.update_node(2 * u, start, mid, l, r, delta, log);
        self.update_node(2 * u + 1, mid + 1, end, l, r, delta, log);
        self.push_up(u);
        log.close(at, self.snapshot(u, start, end));
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self, log)))]
    fn query_node(
        &mut self,
        u: usize,
        start: usize,
        end: usize,
        l: usize,
        r: usize,
        log: &mut TraversalLog,
    ) -> Aggregate {
        if r < start || end < l {
            log.record(u, VisitKind::Disjoint, self.snapshot(u, start, end));
            return Aggregate::NEUTRAL;
        }
        if start != end {
            self.push_down(u, start, end);
        }
        if l <= start && end <= r {
            log.record(u, VisitKind::FullyCovered, self.snapshot(u, start, end));
            let node = &self.nodes[u];
            return Aggregate {
                sum: node.sum,
                min: node.min,
                max: node.max,
            };
        }
        let at = log.open(u, self.snapshot(u, start, end));
        let mid = start + (end - start) / 2;
        let left = self.query_node(2 * u, start, mid, l, r, log);
        let right = self.query_node(2 * u + 1, mid + 1, end, l, r, log);
        log.close(at, self.snapshot(u, start, end));
        left.merge(&right)
    }
}
