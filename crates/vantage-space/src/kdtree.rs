//! Median-split 3-D k-d tree with exact radius queries.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use smallvec::SmallVec;
use tracing::debug;
use vantage_core::{Axis, Point, PointId, PointSet};

use crate::error::SpaceError;

/// Arena slot of a tree node.
type NodeIndex = usize;

/// One node of the tree: the partitioning point plus owned child slots.
#[derive(Clone, Debug)]
pub(crate) struct KdNode {
    pub(crate) point: Point,
    pub(crate) depth: usize,
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,
}

impl KdNode {
    pub(crate) fn axis(&self) -> Axis {
        Axis::from_depth(self.depth)
    }
}

/// A k-d tree over a [`PointSet`], built once and immutable afterwards.
///
/// Nodes live in a flat arena and refer to their children by index, so
/// every subtree has exactly one parent and the structure has no cycles.
///
/// At depth `d` the splitting axis is `d mod 3` (x, y, z). The working
/// subset is sorted on that axis (ties by insertion order) and the
/// element at `len / 2` becomes the node; elements before it form the
/// left subtree and elements after it the right one.
///
/// # Examples
///
/// ```
/// use vantage_core::{Point, PointId, PointSet};
/// use vantage_space::KdTree;
///
/// let points = PointSet::new([
///     Point::new(PointId(1), 0.0, 0.0, 0.0),
///     Point::new(PointId(2), 3.0, 0.0, 0.0),
///     Point::new(PointId(3), 10.0, 0.0, 0.0),
/// ])
/// .unwrap();
/// let tree = KdTree::build(&points);
///
/// let hits = tree.range_query(&points.as_slice()[0], 3.0).unwrap();
/// assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![PointId(1), PointId(2)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    pub(crate) nodes: Vec<KdNode>,
    pub(crate) root: Option<NodeIndex>,
}

impl KdTree {
    /// Build a tree over every point of `points`.
    ///
    /// An empty set yields an empty tree. Coordinates are already
    /// validated by [`PointSet::new`], so construction cannot fail.
    pub fn build(points: &PointSet) -> Self {
        let source = points.as_slice();
        let mut tree = Self {
            nodes: Vec::with_capacity(source.len()),
            root: None,
        };
        let mut working: Vec<usize> = (0..source.len()).collect();
        tree.root = tree.build_subtree(source, &mut working, 0);
        debug!(
            points = source.len(),
            height = tree.height(),
            "built k-d tree"
        );
        tree
    }

    /// Recursively partition `subset` (insertion positions into `source`).
    ///
    /// Recursion depth equals tree height, which the median split keeps
    /// at `⌈log2(n + 1)⌉`.
    fn build_subtree(
        &mut self,
        source: &[Point],
        subset: &mut [usize],
        depth: usize,
    ) -> Option<NodeIndex> {
        if subset.is_empty() {
            return None;
        }
        let axis = Axis::from_depth(depth);
        // Numeric order, so -0.0 and 0.0 tie and fall back to insertion order.
        // Coordinates are finite, so partial_cmp never fails.
        subset.sort_unstable_by(|&a, &b| {
            source[a]
                .coord(axis)
                .partial_cmp(&source[b].coord(axis))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        let median = subset.len() / 2;
        let index = self.nodes.len();
        self.nodes.push(KdNode {
            point: source[subset[median]],
            depth,
            left: None,
            right: None,
        });

        let (before, rest) = subset.split_at_mut(median);
        let after = &mut rest[1..];
        let left = self.build_subtree(source, before, depth + 1);
        let right = self.build_subtree(source, after, depth + 1);
        let node = &mut self.nodes[index];
        node.left = left;
        node.right = right;
        Some(index)
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels; zero for an empty tree.
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }

    /// The point stored at the root, if any.
    pub fn root_point(&self) -> Option<&Point> {
        self.root.map(|i| &self.nodes[i].point)
    }

    /// Identifiers of every point within `radius` of `target` (inclusive).
    ///
    /// The target itself is included when it is a member of the tree.
    /// See [`range_query_at`](Self::range_query_at) for the error and
    /// negative-radius contract.
    pub fn range_query(
        &self,
        target: &Point,
        radius: f64,
    ) -> Result<BTreeSet<PointId>, SpaceError> {
        self.range_query_at(target.coords(), radius)
    }

    /// Identifiers of every point within `radius` of `position`.
    ///
    /// The result always equals a linear scan using
    /// [`Point::covers`]. A negative radius matches nothing and returns an
    /// empty set; a NaN radius or a non-finite position is an error.
    pub fn range_query_at(
        &self,
        position: [f64; 3],
        radius: f64,
    ) -> Result<BTreeSet<PointId>, SpaceError> {
        let mut hits = BTreeSet::new();
        self.visit_within(position, radius, |p| {
            hits.insert(p.id());
        })?;
        Ok(hits)
    }

    /// Call `visit` for every point within `radius` of `position`.
    ///
    /// Traversal is depth-first over an explicit stack: the child on the
    /// target's side of the splitting plane first, the other child only
    /// when the plane itself lies within `radius`. Visit order is not part
    /// of the contract.
    pub fn visit_within<F>(
        &self,
        position: [f64; 3],
        radius: f64,
        mut visit: F,
    ) -> Result<(), SpaceError>
    where
        F: FnMut(&Point),
    {
        for axis in Axis::ALL {
            let value = position[axis.index()];
            if !value.is_finite() {
                return Err(SpaceError::NonFiniteTarget { axis, value });
            }
        }
        if radius.is_nan() {
            return Err(SpaceError::NonFiniteRadius { value: radius });
        }
        if radius < 0.0 {
            return Ok(());
        }

        let mut stack: SmallVec<[NodeIndex; 32]> = SmallVec::new();
        stack.extend(self.root);
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.point.covers(position, radius) {
                visit(&node.point);
            }

            let axis = node.axis();
            let delta = position[axis.index()] - node.point.coord(axis);
            let (near, far) = if delta < 0.0 {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            // Same square-then-sqrt rounding as Point::distance_to, so a far
            // point's computed distance is never below this bound.
            if (delta * delta).sqrt() <= radius {
                stack.extend(far);
            }
            stack.extend(near);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn p(id: i64, x: f64, y: f64, z: f64) -> Point {
        Point::new(PointId(id), x, y, z)
    }

    fn set(points: Vec<Point>) -> PointSet {
        PointSet::new(points).unwrap()
    }

    fn ids(raw: &[i64]) -> BTreeSet<PointId> {
        raw.iter().copied().map(PointId).collect()
    }

    // ── Construction tests ──────────────────────────────────────

    #[test]
    fn build_empty_has_no_root() {
        let tree = KdTree::build(&PointSet::empty());
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.root_point().is_none());
    }

    #[test]
    fn build_single_point_is_leaf() {
        let tree = KdTree::build(&set(vec![p(1, 1.0, 2.0, 3.0)]));
        assert_eq!(tree.len(), 1);
        let root = &tree.nodes[tree.root.unwrap()];
        assert_eq!(root.depth, 0);
        assert!(root.left.is_none());
        assert!(root.right.is_none());
    }

    #[test]
    fn build_picks_median_on_x_at_root() {
        let points = set(vec![
            p(1, 5.0, 0.0, 0.0),
            p(2, 1.0, 0.0, 0.0),
            p(3, 3.0, 0.0, 0.0),
            p(4, 4.0, 0.0, 0.0),
        ]);
        let tree = KdTree::build(&points);
        // Sorted x: 1, 3, 4, 5 -> index 2 is x = 4.
        assert_eq!(tree.root_point().unwrap().id(), PointId(4));
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn build_breaks_ties_by_insertion_order() {
        let points = set(vec![
            p(10, 0.0, 0.0, 0.0),
            p(20, 0.0, 0.0, 0.0),
            p(30, 0.0, 0.0, 0.0),
        ]);
        let tree = KdTree::build(&points);
        assert_eq!(tree.root_point().unwrap().id(), PointId(20));
        let root = &tree.nodes[tree.root.unwrap()];
        let left = &tree.nodes[root.left.unwrap()];
        let right = &tree.nodes[root.right.unwrap()];
        assert_eq!(left.point.id(), PointId(10));
        assert_eq!(right.point.id(), PointId(30));
    }

    #[test]
    fn build_treats_signed_zeros_as_ties() {
        // -0.0 == 0.0, so all three tie on x and insertion order decides.
        let points = set(vec![p(1, 0.0, 0.0, 0.0), p(2, -0.0, 1.0, 0.0), p(3, 0.0, 2.0, 0.0)]);
        let tree = KdTree::build(&points);
        assert_eq!(tree.root_point().unwrap().id(), PointId(2));
        compliance::assert_partition_invariant(&tree);
    }

    #[test]
    fn build_is_deterministic() {
        let points = set(
            (0..40)
                .map(|i| p(i, (i % 7) as f64, (i % 3) as f64, (i % 5) as f64))
                .collect(),
        );
        let a = KdTree::build(&points);
        let b = KdTree::build(&points);
        let order_a: Vec<_> = a.nodes.iter().map(|n| n.point.id()).collect();
        let order_b: Vec<_> = b.nodes.iter().map(|n| n.point.id()).collect();
        assert_eq!(order_a, order_b);
    }

    // ── Query tests ─────────────────────────────────────────────

    #[test]
    fn query_empty_tree_is_empty() {
        let tree = KdTree::build(&PointSet::empty());
        assert!(tree.range_query_at([0.0; 3], 100.0).unwrap().is_empty());
    }

    #[test]
    fn query_includes_target_itself() {
        let points = set(vec![p(1, 0.0, 0.0, 0.0), p(2, 100.0, 0.0, 0.0)]);
        let tree = KdTree::build(&points);
        let hits = tree.range_query(&points.as_slice()[0], 0.0).unwrap();
        assert_eq!(hits, ids(&[1]));
    }

    #[test]
    fn query_radius_is_inclusive() {
        let points = set(vec![p(1, 0.0, 0.0, 0.0), p(2, 0.0, 3.0, 4.0)]);
        let tree = KdTree::build(&points);
        assert_eq!(tree.range_query_at([0.0; 3], 5.0).unwrap(), ids(&[1, 2]));
        assert_eq!(tree.range_query_at([0.0; 3], 4.999).unwrap(), ids(&[1]));
    }

    #[test]
    fn query_negative_radius_is_empty() {
        let points = set(vec![p(1, 0.0, 0.0, 0.0)]);
        let tree = KdTree::build(&points);
        assert!(tree.range_query_at([0.0; 3], -1.0).unwrap().is_empty());
    }

    #[test]
    fn query_nan_radius_is_error() {
        let tree = KdTree::build(&set(vec![p(1, 0.0, 0.0, 0.0)]));
        let result = tree.range_query_at([0.0; 3], f64::NAN);
        assert!(matches!(result, Err(SpaceError::NonFiniteRadius { .. })));
    }

    #[test]
    fn query_nan_target_is_error() {
        let tree = KdTree::build(&set(vec![p(1, 0.0, 0.0, 0.0)]));
        let result = tree.range_query_at([0.0, 0.0, f64::NAN], 1.0);
        assert!(matches!(
            result,
            Err(SpaceError::NonFiniteTarget { axis: Axis::Z, .. })
        ));
    }

    #[test]
    fn query_crosses_splitting_plane() {
        // Target sits just left of the root plane; the hit lives on the right.
        let points = set(vec![
            p(1, -10.0, 0.0, 0.0),
            p(2, 0.0, 0.0, 0.0),
            p(3, 0.5, 0.0, 0.0),
            p(4, 10.0, 0.0, 0.0),
        ]);
        let tree = KdTree::build(&points);
        let hits = tree.range_query_at([-0.1, 0.0, 0.0], 1.0).unwrap();
        assert_eq!(hits, ids(&[2, 3]));
    }

    #[test]
    fn query_infinite_radius_returns_everything() {
        let points = set(
            (0..20)
                .map(|i| p(i, i as f64 * 1e6, 0.0, -(i as f64)))
                .collect(),
        );
        let tree = KdTree::build(&points);
        let hits = tree.range_query_at([0.0; 3], f64::INFINITY).unwrap();
        assert_eq!(hits.len(), 20);
    }

    #[test]
    fn query_underflowing_distances_match_scan() {
        // Squared offsets of 1e-200 underflow to zero, so every point lies at
        // computed distance 0 from every other.
        let points = set(vec![
            p(1, -1e-200, 0.0, 0.0),
            p(2, 0.0, 0.0, 0.0),
            p(3, 1e-200, 0.0, 0.0),
        ]);
        let tree = KdTree::build(&points);
        for target in &points {
            let hits = tree.range_query(target, 0.0).unwrap();
            assert_eq!(hits, ids(&[1, 2, 3]), "target {}", target.id());
            assert_eq!(hits, points.ids_within(target.coords(), 0.0));
        }
    }

    #[test]
    fn query_huge_coordinates_match_scan() {
        // Squared offsets overflow to infinity; only infinite radii reach them.
        let points = set(vec![
            p(1, -1e200, 0.0, 0.0),
            p(2, 0.0, 1e200, 0.0),
            p(3, 1e200, 0.0, -1e200),
        ]);
        compliance::run_full_compliance(&points, &[0.0, 1e200, f64::MAX, f64::INFINITY]);
        let tree = KdTree::build(&points);
        let all = tree.range_query_at([0.0; 3], f64::INFINITY).unwrap();
        assert_eq!(all, ids(&[1, 2, 3]));
    }

    #[test]
    fn visit_within_reports_only_hits() {
        let points = set((0..64).map(|i| p(i, i as f64 * 100.0, 0.0, 0.0)).collect());
        let tree = KdTree::build(&points);
        let mut visited = 0;
        tree.visit_within([0.0; 3], 1.0, |_| visited += 1).unwrap();
        assert_eq!(visited, 1);
    }

    // ── Compliance suites ───────────────────────────────────────

    #[test]
    fn compliance_grid() {
        let mut points = Vec::new();
        let mut id = 0;
        for x in 0..6 {
            for y in 0..6 {
                for z in 0..3 {
                    points.push(p(id, x as f64, y as f64, z as f64));
                    id += 1;
                }
            }
        }
        let points = set(points);
        compliance::run_full_compliance(&points, &[0.0, 1.0, 1.5, 2.0, 10.0]);
    }

    #[test]
    fn compliance_coincident() {
        let points = set((0..9).map(|i| p(i, 2.0, 2.0, 2.0)).collect());
        compliance::run_full_compliance(&points, &[0.0, 1.0]);
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_points(max: usize) -> impl Strategy<Value = PointSet> {
        prop::collection::vec(
            (-7000.0f64..7000.0, -7000.0f64..7000.0, -7000.0f64..7000.0),
            1..=max,
        )
        .prop_map(|coords| {
            PointSet::new(
                coords
                    .into_iter()
                    .enumerate()
                    .map(|(i, (x, y, z))| Point::new(PointId(i as i64 + 1), x, y, z)),
            )
            .unwrap()
        })
    }

    /// Coordinates whose squares underflow or overflow.
    fn extreme_coord() -> impl Strategy<Value = f64> {
        let subnormal = (any::<bool>(), 1u64..(1u64 << 52)).prop_map(|(negative, bits)| {
            let v = f64::from_bits(bits);
            if negative {
                -v
            } else {
                v
            }
        });
        prop_oneof![
            Just(0.0),
            Just(-0.0),
            subnormal,
            -1e-200f64..1e-200,
            -1e-150f64..1e-150,
            -1e200f64..1e200,
        ]
    }

    fn extreme_radius() -> impl Strategy<Value = f64> {
        prop_oneof![
            Just(0.0),
            0.0f64..1e-200,
            0.0f64..1e-150,
            0.0f64..1e200,
            Just(f64::INFINITY),
        ]
    }

    fn arb_extreme_points() -> impl Strategy<Value = PointSet> {
        prop::collection::vec((extreme_coord(), extreme_coord(), extreme_coord()), 1..=40)
            .prop_map(|coords| {
                PointSet::new(
                    coords
                        .into_iter()
                        .enumerate()
                        .map(|(i, (x, y, z))| Point::new(PointId(i as i64), x, y, z)),
                )
                .unwrap()
            })
    }

    proptest! {
        #[test]
        fn range_query_matches_linear_scan_at_extreme_magnitudes(
            points in arb_extreme_points(),
            radius in extreme_radius(),
        ) {
            let tree = KdTree::build(&points);
            for target in &points {
                prop_assert_eq!(
                    tree.range_query(target, radius).unwrap(),
                    points.ids_within(target.coords(), radius)
                );
            }
        }

        #[test]
        fn range_query_matches_linear_scan(
            points in arb_points(500),
            radius in 0.0f64..20000.0,
            pick in any::<prop::sample::Index>(),
        ) {
            let tree = KdTree::build(&points);
            let target = *pick.get(points.as_slice());
            let expected = points.ids_within(target.coords(), radius);
            prop_assert_eq!(tree.range_query(&target, radius).unwrap(), expected);
        }

        #[test]
        fn range_query_matches_linear_scan_off_set(
            points in arb_points(200),
            radius in 0.0f64..5000.0,
            x in -8000.0f64..8000.0,
            y in -8000.0f64..8000.0,
            z in -8000.0f64..8000.0,
        ) {
            let tree = KdTree::build(&points);
            let expected = points.ids_within([x, y, z], radius);
            prop_assert_eq!(tree.range_query_at([x, y, z], radius).unwrap(), expected);
        }

        #[test]
        fn partition_invariant_holds(points in arb_points(300)) {
            let tree = KdTree::build(&points);
            compliance::assert_partition_invariant(&tree);
            compliance::assert_contains_every_point(&tree, &points);
        }
    }
}
