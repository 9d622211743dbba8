//! Property tests pitting the tree against a naive array model.
//!
//! Values and deltas are integer-valued so float sums stay exact regardless
//! of association order.

use proptest::prelude::*;
use segviz::{SegmentTree, DEFAULT_MAX_LEN};

type Update = (usize, usize, f64);

fn values_and_updates() -> impl Strategy<Value = (Vec<f64>, Vec<Update>)> {
    prop::collection::vec((-100i32..=100).prop_map(f64::from), 1..=DEFAULT_MAX_LEN).prop_flat_map(
        |values| {
            let n = values.len();
            let update = (0..n, 0..n, (-50i32..=50).prop_map(f64::from))
                .prop_map(|(a, b, d)| (a.min(b), a.max(b), d));
            let updates = prop::collection::vec(update, 0..8);
            (Just(values), updates)
        },
    )
}

fn naive_aggregate(model: &[f64], l: usize, r: usize) -> (f64, f64, f64) {
    let slice = &model[l..=r];
    let sum = slice.iter().sum();
    let min = slice.iter().copied().fold(f64::INFINITY, f64::min);
    let max = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (sum, min, max)
}

proptest! {
    #[test]
    fn build_matches_naive((values, _) in values_and_updates()) {
        let mut tree = SegmentTree::build(&values).unwrap();
        let n = values.len();
        let (sum, min, max) = naive_aggregate(&values, 0, n - 1);
        let out = tree.query_range(0, n - 1).unwrap();
        prop_assert_eq!(out.result.sum, sum);
        prop_assert_eq!(out.result.min, min);
        prop_assert_eq!(out.result.max, max);
    }

    #[test]
    fn updates_match_naive_model((values, updates) in values_and_updates()) {
        let mut tree = SegmentTree::build(&values).unwrap();
        let mut model = values.clone();
        for &(l, r, delta) in &updates {
            tree.update_range(l, r, delta).unwrap();
            for v in &mut model[l..=r] {
                *v += delta;
            }
        }

        for i in 0..model.len() {
            let out = tree.query_range(i, i).unwrap();
            prop_assert_eq!(out.result.sum, model[i], "point query at {}", i);
            prop_assert_eq!(out.result.min, model[i]);
            prop_assert_eq!(out.result.max, model[i]);
        }
    }

    #[test]
    fn every_subrange_matches_naive_model((values, updates) in values_and_updates()) {
        let mut tree = SegmentTree::build(&values).unwrap();
        let mut model = values.clone();
        for &(l, r, delta) in &updates {
            tree.update_range(l, r, delta).unwrap();
            for v in &mut model[l..=r] {
                *v += delta;
            }
        }

        let n = model.len();
        for l in 0..n {
            for r in l..n {
                let (sum, min, max) = naive_aggregate(&model, l, r);
                let out = tree.query_range(l, r).unwrap();
                prop_assert_eq!(out.result.sum, sum, "sum over [{}, {}]", l, r);
                prop_assert_eq!(out.result.min, min, "min over [{}, {}]", l, r);
                prop_assert_eq!(out.result.max, max, "max over [{}, {}]", l, r);
            }
        }
    }

    #[test]
    fn internal_nodes_merge_consistently((values, updates) in values_and_updates()) {
        let mut tree = SegmentTree::build(&values).unwrap();
        for &(l, r, delta) in &updates {
            tree.update_range(l, r, delta).unwrap();
        }

        // Force every pending tag down by querying each leaf; afterwards no
        // internal node may hold a tag and each must equal its children's merge.
        let n = values.len();
        for i in 0..n {
            tree.query_range(i, i).unwrap();
        }

        for u in 1..4 * n {
            let Some(node) = tree.node_snapshot(u) else {
                continue;
            };
            if node.range.0 == node.range.1 {
                prop_assert_eq!(node.lazy, 0.0, "leaf {} holds a lazy tag", u);
                continue;
            }
            prop_assert_eq!(node.lazy, 0.0, "internal node {} still lazy", u);
            let left = tree.node_snapshot(2 * u).unwrap();
            let right = tree.node_snapshot(2 * u + 1).unwrap();
            prop_assert_eq!(node.sum, left.sum + right.sum, "sum at node {}", u);
            prop_assert_eq!(node.min, left.min.min(right.min), "min at node {}", u);
            prop_assert_eq!(node.max, left.max.max(right.max), "max at node {}", u);
        }
    }

    #[test]
    fn identical_trees_produce_identical_logs((values, updates) in values_and_updates()) {
        let mut a = SegmentTree::build(&values).unwrap();
        let mut b = SegmentTree::build(&values).unwrap();
        for &(l, r, delta) in &updates {
            let log_a = a.update_range(l, r, delta).unwrap();
            let log_b = b.update_range(l, r, delta).unwrap();
            prop_assert_eq!(log_a, log_b);
        }

        let n = values.len();
        let out_a = a.query_range(0, n - 1).unwrap();
        let out_b = b.query_range(0, n - 1).unwrap();
        prop_assert_eq!(out_a.log, out_b.log);
        prop_assert_eq!(out_a.result, out_b.result);
    }

    #[test]
    fn repeated_query_keeps_node_order_and_kinds((values, updates) in values_and_updates()) {
        let mut tree = SegmentTree::build(&values).unwrap();
        for &(l, r, delta) in &updates {
            tree.update_range(l, r, delta).unwrap();
        }

        let n = values.len();
        let first = tree.query_range(0, n - 1).unwrap();
        // The second query may observe different lazy tags in its snapshots
        // (the first one pushed some down), but the traversal shape is fixed.
        let second = tree.query_range(0, n - 1).unwrap();
        let shape = |log: &segviz::TraversalLog| {
            log.iter().map(|v| (v.node, v.kind)).collect::<Vec<_>>()
        };
        prop_assert_eq!(shape(&first.log), shape(&second.log));
        prop_assert_eq!(first.result, second.result);
    }
}
