//! Test utilities for Vantage development.
//!
//! Provides seeded point-set [`fixtures`] and brute-force oracles that the
//! integration tests compare the indexed and greedy paths against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::BTreeSet;

use vantage_core::{PointId, PointSet};
use vantage_space::ProximityGraph;

pub use fixtures::{cluster, disjoint_clusters, random_cube_points, random_geo_points};

/// Ids within `radius` of `position`, by checking every point.
pub fn scan_within(points: &PointSet, position: [f64; 3], radius: f64) -> BTreeSet<PointId> {
    points
        .iter()
        .filter(|p| p.distance_to(position) <= radius)
        .map(|p| p.id())
        .collect()
}

/// Best input-point candidate by exhaustive search: `(id, covered_count)`
/// of the first point, in set order, with the highest coverage.
pub fn best_point_oracle(points: &PointSet, radius: f64) -> Option<(PointId, usize)> {
    let mut best: Option<(PointId, usize)> = None;
    for p in points {
        let count = scan_within(points, p.coords(), radius).len();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((p.id(), count)),
        }
    }
    best
}

/// Panic unless every node of `graph` is in `set` or adjacent to a member.
pub fn assert_dominates(graph: &ProximityGraph, set: impl IntoIterator<Item = PointId>) {
    let set: BTreeSet<PointId> = set.into_iter().collect();
    for id in &set {
        assert!(graph.contains(*id), "member {id} is not a node");
    }
    for id in graph.node_ids() {
        if set.contains(&id) {
            continue;
        }
        let neighbours = graph.neighbors(id).expect("node_ids yields nodes");
        assert!(
            neighbours.iter().any(|nb| set.contains(nb)),
            "node {id} is neither selected nor adjacent to a selected node"
        );
    }
}
