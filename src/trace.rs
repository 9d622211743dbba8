//! Traversal logs and their consumer-side replay.
//!
//! Every engine operation records, in call order, the nodes its recursion
//! touched. The log is generated eagerly and in full during the operation
//! call; "step mode" animation is purely an iteration over the finished
//! sequence, never a resumable computation inside the engine.

/// Relationship between an operation's target range and a node's covered
/// range. This is the three-way branch every recursive operation takes, and
/// the distinction an external renderer keys its highlighting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    /// The node's range has no overlap with the target range; the recursion
    /// turned back here without touching the subtree.
    Disjoint,
    /// The node's range lies entirely inside the target range; the
    /// recursion terminated here and the node counts toward the result.
    FullyCovered,
    /// The ranges overlap partially; the recursion descended into both
    /// children and merged at this node.
    PartiallyCovered,
}

/// A node's state at a point in time: its aggregates, pending lazy delta,
/// and the index range it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSnapshot {
    /// Sum over the covered range, lazily-consistent.
    pub sum: f64,
    /// Minimum over the covered range.
    pub min: f64,
    /// Maximum over the covered range.
    pub max: f64,
    /// Pending additive delta not yet pushed to children; `0.0` means none.
    pub lazy: f64,
    /// Inclusive `[start, end]` index range the node covers.
    pub range: (usize, usize),
}

/// Aggregate result of a range query, also the value merged up the
/// recursion. [`Aggregate::NEUTRAL`] contributes nothing to a merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl Aggregate {
    /// Identity of [`merge`](Self::merge): zero sum, extreme min/max.
    pub const NEUTRAL: Self = Self {
        sum: 0.0,
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Combine two partial results.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// One visited node, annotated with how the operation related to it and
/// what the node looked like once the visit completed. For a partially
/// covered node the snapshot is taken after the post-recursion merge, so it
/// already reflects the children's contributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitRecord {
    /// 1-indexed slot in the implicit tree array.
    pub node: usize,
    pub kind: VisitKind,
    pub snapshot: NodeSnapshot,
}

/// Ordered, immutable record of every node visited during one operation.
///
/// The sequence is deterministic: identical tree state and identical
/// parameters always produce the same node order and the same kind per
/// node. Records appear in call (pre-)order, so a parent precedes the
/// visits made inside its subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraversalLog {
    visits: Vec<VisitRecord>,
}

impl TraversalLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a terminal visit (disjoint or fully covered).
    pub(crate) fn record(&mut self, node: usize, kind: VisitKind, snapshot: NodeSnapshot) {
        self.visits.push(VisitRecord {
            node,
            kind,
            snapshot,
        });
    }

    /// Open a partially-covered visit at its call-order position, returning
    /// the index to patch once the subtree work is done.
    pub(crate) fn open(&mut self, node: usize, snapshot: NodeSnapshot) -> usize {
        let at = self.visits.len();
        self.visits.push(VisitRecord {
            node,
            kind: VisitKind::PartiallyCovered,
            snapshot,
        });
        at
    }

    /// Patch an opened visit with the node's post-merge snapshot.
    pub(crate) fn close(&mut self, at: usize, snapshot: NodeSnapshot) {
        self.visits[at].snapshot = snapshot;
    }

    /// Number of recorded visits.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns true if the operation visited no nodes.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Iterate over the visits in call order.
    pub fn iter(&self) -> std::slice::Iter<'_, VisitRecord> {
        self.visits.iter()
    }

    /// The visits as a slice.
    pub fn visits(&self) -> &[VisitRecord] {
        &self.visits
    }

    /// Begin a step-by-step replay of this log.
    pub fn replay(&self) -> Replay<'_> {
        Replay { log: self, next: 0 }
    }
}

impl std::ops::Index<usize> for TraversalLog {
    type Output = VisitRecord;

    fn index(&self, at: usize) -> &VisitRecord {
        &self.visits[at]
    }
}

impl<'a> IntoIterator for &'a TraversalLog {
    type Item = &'a VisitRecord;
    type IntoIter = std::slice::Iter<'a, VisitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.visits.iter()
    }
}

/// Progress of a [`Replay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No visit has been consumed yet.
    NotStarted,
    /// `consumed` visits have been stepped through; more remain.
    InProgress { consumed: usize },
    /// Every visit has been consumed.
    Complete,
}

/// Consumer-side state machine over a finished [`TraversalLog`].
///
/// The underlying tree was fully updated before the log was returned, so
/// dropping a replay mid-way cancels nothing: it only discards a cursor.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    log: &'a TraversalLog,
    next: usize,
}

impl<'a> Replay<'a> {
    /// Advance one visit ("step mode"). Returns `None` once complete.
    pub fn step(&mut self) -> Option<&'a VisitRecord> {
        let record = self.log.visits.get(self.next)?;
        self.next += 1;
        Some(record)
    }

    /// Consume all remaining visits at once ("direct mode").
    pub fn run_to_end(&mut self) -> &'a [VisitRecord] {
        let rest = &self.log.visits[self.next..];
        self.next = self.log.visits.len();
        rest
    }

    /// Where the replay currently stands.
    pub fn state(&self) -> ReplayState {
        if self.next == 0 && !self.log.is_empty() {
            ReplayState::NotStarted
        } else if self.next < self.log.len() {
            ReplayState::InProgress {
                consumed: self.next,
            }
        } else {
            ReplayState::Complete
        }
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = &'a VisitRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}
