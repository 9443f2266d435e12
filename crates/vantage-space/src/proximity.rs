//! Undirected proximity graph built by distance thresholding.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use vantage_core::{CoreError, PointId, PointSet};

use crate::error::SpaceError;
use crate::kdtree::KdTree;

/// Undirected graph linking points that lie within a fixed radius.
///
/// Edge `(a, b)` exists iff `distance(a, b) <= radius`. The graph is
/// symmetric, has no self-loops, and is immutable once built. Nodes keep
/// the insertion order of the [`PointSet`] they came from.
///
/// # Examples
///
/// ```
/// use vantage_core::{Point, PointId, PointSet};
/// use vantage_space::ProximityGraph;
///
/// let points = PointSet::new([
///     Point::new(PointId(1), 0.0, 0.0, 0.0),
///     Point::new(PointId(2), 1.0, 0.0, 0.0),
///     Point::new(PointId(3), 9.0, 0.0, 0.0),
/// ])
/// .unwrap();
/// let graph = ProximityGraph::build(&points, 2.0).unwrap();
/// assert!(graph.are_adjacent(PointId(1), PointId(2)));
/// assert_eq!(graph.degree(PointId(3)), Some(0));
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProximityGraph {
    adjacency: IndexMap<PointId, IndexSet<PointId>>,
}

impl ProximityGraph {
    /// Build the graph by checking every pair of points.
    ///
    /// Fails if `radius` is NaN or negative.
    pub fn build(points: &PointSet, radius: f64) -> Result<Self, SpaceError> {
        check_radius(radius)?;
        let mut graph = Self::with_nodes(points.ids());
        let slice = points.as_slice();
        for (i, a) in slice.iter().enumerate() {
            for b in &slice[i + 1..] {
                if a.covers(b.coords(), radius) {
                    graph.link(a.id(), b.id());
                }
            }
        }
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            radius,
            "built proximity graph"
        );
        Ok(graph)
    }

    /// Build the same graph as [`build`](Self::build) using range queries
    /// against a tree built over `points`.
    pub fn build_indexed(
        points: &PointSet,
        radius: f64,
        index: &KdTree,
    ) -> Result<Self, SpaceError> {
        check_radius(radius)?;
        let mut graph = Self::with_nodes(points.ids());
        for point in points {
            for neighbour in index.range_query(point, radius)? {
                if neighbour != point.id() && graph.adjacency.contains_key(&neighbour) {
                    graph.link(point.id(), neighbour);
                }
            }
        }
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            radius,
            "built proximity graph from index"
        );
        Ok(graph)
    }

    /// Build a graph from explicit nodes and undirected edges.
    ///
    /// Fails on duplicate node ids, self-loops, or edges that mention an
    /// undeclared node. Repeated edges are merged.
    pub fn from_edges(
        ids: impl IntoIterator<Item = PointId>,
        edges: impl IntoIterator<Item = (PointId, PointId)>,
    ) -> Result<Self, SpaceError> {
        let mut graph = Self::default();
        for id in ids {
            if graph.adjacency.insert(id, IndexSet::new()).is_some() {
                return Err(CoreError::DuplicateId { id }.into());
            }
        }
        for (a, b) in edges {
            if a == b {
                return Err(SpaceError::SelfLoop { id: a });
            }
            for id in [a, b] {
                if !graph.adjacency.contains_key(&id) {
                    return Err(SpaceError::UnknownNode { id });
                }
            }
            graph.link(a, b);
        }
        Ok(graph)
    }

    fn with_nodes(ids: impl Iterator<Item = PointId>) -> Self {
        Self {
            adjacency: ids.map(|id| (id, IndexSet::new())).collect(),
        }
    }

    /// Insert both directions of an edge between two declared nodes.
    fn link(&mut self, a: PointId, b: PointId) {
        if let Some(n) = self.adjacency.get_mut(&a) {
            n.insert(b);
        }
        if let Some(n) = self.adjacency.get_mut(&b) {
            n.insert(a);
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum::<usize>() / 2
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Returns `true` if `id` is a node of the graph.
    pub fn contains(&self, id: PointId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbours of `id`, or `None` if `id` is not a node.
    pub fn neighbors(&self, id: PointId) -> Option<&IndexSet<PointId>> {
        self.adjacency.get(&id)
    }

    /// Number of neighbours of `id`, or `None` if `id` is not a node.
    pub fn degree(&self, id: PointId) -> Option<usize> {
        self.adjacency.get(&id).map(IndexSet::len)
    }

    /// Returns `true` if an edge joins `a` and `b`.
    pub fn are_adjacent(&self, a: PointId, b: PointId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbours| neighbours.contains(&b))
    }
}

fn check_radius(radius: f64) -> Result<(), SpaceError> {
    if radius.is_nan() {
        return Err(SpaceError::NonFiniteRadius { value: radius });
    }
    if radius < 0.0 {
        return Err(SpaceError::NegativeRadius { value: radius });
    }
    Ok(())
}
