//! k-d tree compliance test helpers.
//!
//! These functions verify that a built [`KdTree`] satisfies its structural
//! invariants and answers queries exactly like a linear scan. Reused by
//! the tree and proximity-graph test modules.

use indexmap::IndexSet;
use vantage_core::{Axis, PointId, PointSet};

use crate::kdtree::KdTree;

/// Assert the left/right partition invariant at every node.
///
/// For a node on axis `a`, every point in the left subtree has
/// `coord[a] <= node.coord[a]` and every point in the right subtree has
/// `coord[a] >= node.coord[a]`.
pub fn assert_partition_invariant(tree: &KdTree) {
    for node in &tree.nodes {
        let axis = node.axis();
        let split = node.point.coord(axis);
        for value in subtree_coords(tree, node.left, axis) {
            assert!(
                value <= split,
                "left subtree value {value} exceeds split {split} on {axis}"
            );
        }
        for value in subtree_coords(tree, node.right, axis) {
            assert!(
                value >= split,
                "right subtree value {value} below split {split} on {axis}"
            );
        }
    }
}

/// Coordinates along `axis` of every point under `start`.
fn subtree_coords(tree: &KdTree, start: Option<usize>, axis: Axis) -> Vec<f64> {
    let mut out = Vec::new();
    let mut stack: Vec<usize> = start.into_iter().collect();
    while let Some(i) = stack.pop() {
        let node = &tree.nodes[i];
        out.push(node.point.coord(axis));
        stack.extend(node.left);
        stack.extend(node.right);
    }
    out
}

/// Assert that child depths are exactly one more than their parent's.
pub fn assert_depths_consistent(tree: &KdTree) {
    for node in &tree.nodes {
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(
                tree.nodes[child].depth,
                node.depth + 1,
                "child depth does not follow parent depth {}",
                node.depth
            );
        }
    }
    if let Some(root) = tree.root {
        assert_eq!(tree.nodes[root].depth, 0, "root depth must be 0");
    }
}

/// Assert that every point of `points` is stored exactly once.
pub fn assert_contains_every_point(tree: &KdTree, points: &PointSet) {
    assert_eq!(tree.len(), points.len(), "tree size != point count");
    let stored: IndexSet<PointId> = tree.nodes.iter().map(|n| n.point.id()).collect();
    assert_eq!(stored.len(), points.len(), "tree stores duplicate points");
    for id in points.ids() {
        assert!(stored.contains(&id), "point {id} missing from tree");
    }
}

/// Assert that the tree height stays within the balanced bound.
pub fn assert_balanced(tree: &KdTree) {
    let n = tree.len();
    let bound = usize::BITS as usize - n.leading_zeros() as usize;
    assert!(
        tree.height() <= bound,
        "height {} exceeds ceil(log2({n} + 1)) = {bound}",
        tree.height()
    );
}

/// Assert that every member point, queried at each radius, matches the
/// linear scan.
pub fn assert_queries_match_scan(tree: &KdTree, points: &PointSet, radii: &[f64]) {
    for target in points {
        for &radius in radii {
            let got = tree
                .range_query(target, radius)
                .expect("member points are finite");
            let expected = points.ids_within(target.coords(), radius);
            assert_eq!(
                got,
                expected,
                "query at {} with radius {radius} disagrees with scan",
                target.id()
            );
        }
    }
}

/// Run all compliance checks on a tree built from `points`.
pub fn run_full_compliance(points: &PointSet, radii: &[f64]) {
    let tree = KdTree::build(points);
    assert_partition_invariant(&tree);
    assert_depths_consistent(&tree);
    assert_contains_every_point(&tree, points);
    assert_balanced(&tree);
    assert_queries_match_scan(&tree, points, radii);
}
