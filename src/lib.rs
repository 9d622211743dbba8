//! segviz — a segment-tree engine for step-by-step visualizers.
//!
//! This crate is the algorithmic core of a segment-tree visualizer: an
//! array-backed tree with sum/min/max aggregates per node, range-additive
//! updates with lazy propagation, and range queries. What makes it a
//! *visualizer* core is that every operation also returns a deterministic
//! [`TraversalLog`] of the nodes its recursion visited, which a rendering
//! layer replays to animate the structure one step at a time.
//!
//! ## Core idea
//! 1. [`SegmentTree::build`] a tree from an array of finite numbers.
//! 2. Mutate it with [`SegmentTree::update_range`], read it with
//!    [`SegmentTree::query_range`]; both hand back a traversal log.
//! 3. Drive the animation by pulling visits from [`TraversalLog::replay`] —
//!    one [`Replay::step`] per animation frame, or
//!    [`Replay::run_to_end`] to jump straight to the final state.
//!
//! The engine carries no rendering concerns: no colors, no layout, no
//! pacing. It exposes which nodes were visited, in what order, with what
//! coverage relationship and resulting state; everything visual is the
//! caller's problem.
//!
//! ## Quick start
//! ```
//! use segviz::{SegmentTree, VisitKind};
//!
//! let mut tree = SegmentTree::build(&[1.0, 3.0, 5.0, 7.0, 2.0, 4.0, 6.0, 8.0])?;
//! tree.update_range(2, 5, 10.0)?;
//!
//! let outcome = tree.query_range(0, 7)?;
//! assert_eq!(outcome.result.sum, 76.0);
//! assert_eq!(outcome.result.min, 1.0);
//! assert_eq!(outcome.result.max, 17.0);
//!
//! for visit in &outcome.log {
//!     if visit.kind == VisitKind::FullyCovered {
//!         println!("node {} contributed {:?}", visit.node, visit.snapshot);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod error;
pub mod trace;
pub mod tree;
pub mod utils;

pub use crate::builder::SegmentTreeBuilder;
pub use crate::error::{BuildError, RangeError};
pub use crate::trace::{
    Aggregate, NodeSnapshot, Replay, ReplayState, TraversalLog, VisitKind, VisitRecord,
};
pub use crate::tree::{QueryOutcome, SegmentTree};
pub use crate::utils::DEFAULT_MAX_LEN;
