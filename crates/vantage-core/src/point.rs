//! Points, splitting axes, and the immutable [`PointSet`].

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::id::PointId;

/// One of the three Cartesian axes.
///
/// k-d tree levels cycle through the axes in `X → Y → Z` order, see
/// [`Axis::from_depth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First coordinate.
    X,
    /// Second coordinate.
    Y,
    /// Third coordinate.
    Z,
}

impl Axis {
    /// All axes in canonical order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Splitting axis for a tree level: `depth mod 3`.
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth % 3]
    }

    /// Position of this axis in a `[x, y, z]` array.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// An identified position in 3-D space.
///
/// Points are plain values: once created they never change. Construction
/// does not validate the coordinates; [`PointSet::new`] and the query
/// entry points reject non-finite values before using them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    id: PointId,
    coords: [f64; 3],
}

impl Point {
    /// Create a point from an identifier and Cartesian coordinates.
    pub fn new(id: impl Into<PointId>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            coords: [x, y, z],
        }
    }

    /// Create a synthetic point carrying [`PointId::SYNTHETIC`].
    pub fn synthetic(coords: [f64; 3]) -> Self {
        Self {
            id: PointId::SYNTHETIC,
            coords,
        }
    }

    /// The point's identifier.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Z coordinate.
    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    /// Coordinate along `axis`.
    pub fn coord(&self, axis: Axis) -> f64 {
        self.coords[axis.index()]
    }

    /// All three coordinates as `[x, y, z]`.
    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_to(other.coords)
    }

    /// Euclidean distance to a raw position.
    pub fn distance_to(&self, position: [f64; 3]) -> f64 {
        let dx = self.coords[0] - position[0];
        let dy = self.coords[1] - position[1];
        let dz = self.coords[2] - position[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Returns `true` if `position` lies within `radius` (inclusive).
    ///
    /// This is the single coverage predicate used by every query path, so
    /// brute-force scans and indexed queries agree bit-for-bit.
    pub fn covers(&self, position: [f64; 3], radius: f64) -> bool {
        self.distance_to(position) <= radius
    }

    /// Reject NaN or infinite coordinates.
    pub fn validate(&self) -> Result<(), CoreError> {
        for axis in Axis::ALL {
            let value = self.coord(axis);
            if !value.is_finite() {
                return Err(CoreError::NonFiniteCoordinate {
                    id: self.id,
                    axis,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Axis-aligned bounding box of a non-empty point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Per-axis minimum.
    pub min: [f64; 3],
    /// Per-axis maximum.
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Midpoint of the box.
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Extent along `axis`; zero when every point shares that coordinate.
    pub fn extent(&self, axis: Axis) -> f64 {
        self.max[axis.index()] - self.min[axis.index()]
    }
}

/// An immutable, ordered collection of uniquely identified points.
///
/// Order is insertion order. It never affects distances, only the
/// deterministic tie-breaks of the selection algorithms.
///
/// # Examples
///
/// ```
/// use vantage_core::{Point, PointId, PointSet};
///
/// let set = PointSet::new([
///     Point::new(PointId(3), 0.0, 0.0, 0.0),
///     Point::new(PointId(1), 1.0, 0.0, 0.0),
/// ])
/// .unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.as_slice()[0].id(), PointId(3));
/// assert_eq!(set.get(PointId(1)).unwrap().x(), 1.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
    index: IndexMap<PointId, usize>,
}

impl PointSet {
    /// Build a point set, validating every point.
    ///
    /// Fails on the first non-finite coordinate, duplicate identifier, or
    /// use of the reserved synthetic identifier. Any `i64` is a valid id
    /// except `-1` ([`PointId::SYNTHETIC`]), which is rejected with
    /// [`CoreError::ReservedId`].
    pub fn new(points: impl IntoIterator<Item = Point>) -> Result<Self, CoreError> {
        let points: Vec<Point> = points.into_iter().collect();
        let mut index = IndexMap::with_capacity(points.len());
        for (position, point) in points.iter().enumerate() {
            if point.id.is_synthetic() {
                return Err(CoreError::ReservedId { id: point.id });
            }
            point.validate()?;
            if index.insert(point.id, position).is_some() {
                return Err(CoreError::DuplicateId { id: point.id });
            }
        }
        Ok(Self { points, index })
    }

    /// A set with no points.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Iterate points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.points.iter().map(Point::id)
    }

    /// Look up a point by identifier.
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.index.get(&id).map(|&i| &self.points[i])
    }

    /// Insertion-order position of `id`.
    pub fn position(&self, id: PointId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Returns `true` if the set contains `id`.
    pub fn contains(&self, id: PointId) -> bool {
        self.index.contains_key(&id)
    }

    /// Identifiers of every point within `radius` of `position`, by linear
    /// scan with [`Point::covers`].
    pub fn ids_within(&self, position: [f64; 3], radius: f64) -> BTreeSet<PointId> {
        self.points
            .iter()
            .filter(|p| p.covers(position, radius))
            .map(Point::id)
            .collect()
    }

    /// Axis-aligned bounding box, or `None` for an empty set.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let init = BoundingBox {
            min: first.coords,
            max: first.coords,
        };
        Some(self.points.iter().fold(init, |mut bb, p| {
            for i in 0..3 {
                bb.min[i] = bb.min[i].min(p.coords[i]);
                bb.max[i] = bb.max[i].max(p.coords[i]);
            }
            bb
        }))
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
