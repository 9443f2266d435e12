//! Greedy minimum-dominating-set approximation.
//!
//! The approximator repeatedly picks the unselected node with the most
//! uncovered neighbours, breaking ties by the smallest id, then marks that
//! node and its neighbours as covered. It stops once every node is
//! covered. Candidates whose closed neighbourhood is already fully covered
//! are skipped: picking one would add a member without covering anything,
//! so every step covers at least one new node and the loop runs at most
//! `n` times.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use tracing::{debug, trace, warn};
use vantage_core::PointId;
use vantage_space::ProximityGraph;

/// A set of node ids such that every node of the graph is either a member
/// or adjacent to one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DominatingSet(BTreeSet<PointId>);

impl DominatingSet {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `id` is a member.
    pub fn contains(&self, id: PointId) -> bool {
        self.0.contains(&id)
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = PointId> + '_ {
        self.0.iter().copied()
    }

    /// Members as an ordered set.
    pub fn as_set(&self) -> &BTreeSet<PointId> {
        &self.0
    }

    /// Returns `true` if every node of `graph` is a member or has a
    /// neighbour that is.
    pub fn dominates(&self, graph: &ProximityGraph) -> bool {
        graph.node_ids().all(|id| {
            self.contains(id)
                || graph
                    .neighbors(id)
                    .is_some_and(|n| n.iter().any(|&nb| self.contains(nb)))
        })
    }
}

impl FromIterator<PointId> for DominatingSet {
    fn from_iter<I: IntoIterator<Item = PointId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DominatingSet {
    type Item = PointId;
    type IntoIter = std::collections::btree_set::IntoIter<PointId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One iteration of the greedy loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GreedyStep {
    /// Node added to the dominating set.
    pub chosen: PointId,
    /// Neighbours of `chosen` that were uncovered when it was picked.
    pub uncovered_neighbours: usize,
    /// Nodes covered by this step, including `chosen` itself if it was
    /// not yet covered. Always at least 1.
    pub newly_covered: usize,
    /// Covered nodes after this step.
    pub covered_total: usize,
}

/// Iterator over the steps of the greedy approximation.
///
/// Each call to [`next`](Iterator::next) performs one selection; the
/// iterator ends once every node is covered. [`approximate`] drains it.
///
/// # Examples
///
/// ```
/// use vantage_core::PointId;
/// use vantage_space::ProximityGraph;
/// use vantage_select::DominatingSetApproximator;
///
/// // A star centred on 4.
/// let graph = ProximityGraph::from_edges(
///     [1, 2, 3, 4].map(PointId),
///     [(4, 1), (4, 2), (4, 3)].map(|(a, b)| (PointId(a), PointId(b))),
/// )
/// .unwrap();
/// let steps: Vec<_> = DominatingSetApproximator::new(&graph).collect();
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].chosen, PointId(4));
/// assert_eq!(steps[0].covered_total, 4);
/// ```
pub struct DominatingSetApproximator<'g> {
    graph: &'g ProximityGraph,
    unselected: BTreeSet<PointId>,
    selected: BTreeSet<PointId>,
    covered: IndexSet<PointId>,
}

impl<'g> DominatingSetApproximator<'g> {
    /// Start the greedy loop with nothing selected and nothing covered.
    pub fn new(graph: &'g ProximityGraph) -> Self {
        Self {
            graph,
            unselected: graph.node_ids().collect(),
            selected: BTreeSet::new(),
            covered: IndexSet::with_capacity(graph.len()),
        }
    }

    /// Nodes selected so far.
    pub fn selected(&self) -> &BTreeSet<PointId> {
        &self.selected
    }

    /// Returns `true` once every node is covered.
    pub fn is_complete(&self) -> bool {
        self.covered.len() == self.graph.len()
    }

    /// Run to completion and return the dominating set.
    pub fn finish(mut self) -> DominatingSet {
        for _ in self.by_ref() {}
        DominatingSet(self.selected)
    }

    /// Neighbours of `id`. An id missing from the graph is a construction
    /// bug: fatal in debug builds, treated as isolated otherwise.
    fn neighbours(&self, id: PointId) -> impl Iterator<Item = PointId> + 'g {
        let found = self.graph.neighbors(id);
        debug_assert!(found.is_some(), "node {id} has no adjacency entry");
        if found.is_none() {
            warn!(%id, "node has no adjacency entry, treating as isolated");
        }
        found.into_iter().flatten().copied()
    }

    fn uncovered_neighbours(&self, id: PointId) -> usize {
        self.neighbours(id)
            .filter(|nb| !self.covered.contains(nb))
            .count()
    }
}

impl Iterator for DominatingSetApproximator<'_> {
    type Item = GreedyStep;

    fn next(&mut self) -> Option<GreedyStep> {
        if self.is_complete() {
            return None;
        }

        // Ascending scan with a strict comparison keeps the smallest id on ties.
        let mut best: Option<(PointId, usize)> = None;
        for &id in &self.unselected {
            let gain = self.uncovered_neighbours(id);
            if gain == 0 && self.covered.contains(&id) {
                continue;
            }
            if best.is_none_or(|(_, best_gain)| gain > best_gain) {
                best = Some((id, gain));
            }
        }
        let (chosen, uncovered_neighbours) = best?;

        let before = self.covered.len();
        self.unselected.remove(&chosen);
        self.selected.insert(chosen);
        self.covered.insert(chosen);
        let neighbours: Vec<PointId> = self.neighbours(chosen).collect();
        self.covered.extend(neighbours);
        let step = GreedyStep {
            chosen,
            uncovered_neighbours,
            newly_covered: self.covered.len() - before,
            covered_total: self.covered.len(),
        };
        trace!(
            chosen = %step.chosen,
            newly_covered = step.newly_covered,
            covered_total = step.covered_total,
            "greedy step"
        );
        Some(step)
    }
}

/// Greedily approximate a minimum dominating set of `graph`.
///
/// An empty graph yields an empty set. The result is deterministic but
/// not guaranteed to be minimum.
pub fn approximate(graph: &ProximityGraph) -> DominatingSet {
    let approximator = DominatingSetApproximator::new(graph);
    let result = approximator.finish();
    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        selected = result.len(),
        "approximated dominating set"
    );
    result
}
