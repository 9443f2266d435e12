//! Maximum-coverage position selection.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;
use vantage_core::{Axis, BoundingBox, Point, PointId, PointSet};
use vantage_space::KdTree;

use crate::config::SelectorConfig;
use crate::error::SelectError;

/// How candidate positions are generated and scored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    /// Every input point is a candidate; coverage by linear scan.
    BruteForce,
    /// Every input point is a candidate; coverage by k-d tree range query.
    /// Always agrees with [`BruteForce`](Self::BruteForce).
    IndexAccelerated,
    /// Candidates lie on a regular grid spanning the bounding box of the
    /// input, `step` apart on every axis. May select a position that is not
    /// an input point.
    GridSearch {
        /// Distance between neighbouring grid positions.
        step: f64,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BruteForce => write!(f, "brute-force"),
            Self::IndexAccelerated => write!(f, "index-accelerated"),
            Self::GridSearch { step } => write!(f, "grid-search(step={step})"),
        }
    }
}

/// The winning candidate of a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageResult {
    /// Selected position. Grid candidates carry
    /// [`PointId::SYNTHETIC`].
    pub point: Point,
    /// Number of input points within the view radius of `point`.
    pub covered_count: usize,
    /// Identifiers of those points.
    pub covered_ids: BTreeSet<PointId>,
}

impl CoverageResult {
    fn new(point: Point, covered_ids: BTreeSet<PointId>) -> Self {
        Self {
            point,
            covered_count: covered_ids.len(),
            covered_ids,
        }
    }

    /// Returns `true` if the position is a grid candidate rather than an
    /// input point.
    pub fn is_synthetic(&self) -> bool {
        self.point.id().is_synthetic()
    }
}

/// Identifiers of every point in `points` within `radius` of `position`,
/// by linear scan.
pub fn covered_by(points: &PointSet, position: [f64; 3], radius: f64) -> BTreeSet<PointId> {
    points.ids_within(position, radius)
}

/// Finds the position covering the most points for a validated
/// [`SelectorConfig`].
///
/// # Examples
///
/// ```
/// use vantage_core::{Point, PointId, PointSet};
/// use vantage_select::{CoverageSelector, SelectorConfig, Strategy};
///
/// let points = PointSet::new([
///     Point::new(PointId(1), 0.0, 0.0, 0.0),
///     Point::new(PointId(2), 1.0, 0.0, 0.0),
///     Point::new(PointId(3), 2.0, 0.0, 0.0),
///     Point::new(PointId(4), 50.0, 0.0, 0.0),
/// ])
/// .unwrap();
/// let selector =
///     CoverageSelector::new(SelectorConfig::new(1.0, Strategy::IndexAccelerated)).unwrap();
/// let best = selector.select(&points).unwrap().unwrap();
/// assert_eq!(best.point.id(), PointId(2));
/// assert_eq!(best.covered_count, 3);
/// ```
#[derive(Clone, Debug)]
pub struct CoverageSelector {
    config: SelectorConfig,
}

impl CoverageSelector {
    /// Create a selector, validating `config`.
    pub fn new(config: SelectorConfig) -> Result<Self, SelectError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select the best-covering candidate, or `None` for an empty set.
    ///
    /// For point candidates, ties keep the earliest candidate in
    /// `points` order. For grid candidates, ties prefer the position
    /// nearest the bounding-box center, then the earliest in scan order.
    pub fn select(&self, points: &PointSet) -> Result<Option<CoverageResult>, SelectError> {
        let radius = self.config.radius;
        let best = match self.config.strategy {
            Strategy::BruteForce => {
                best_point_candidate(points, |c| Ok(covered_by(points, c.coords(), radius)))?
            }
            Strategy::IndexAccelerated => {
                let index = KdTree::build(points);
                best_point_candidate(points, |c| Ok(index.range_query(c, radius)?))?
            }
            Strategy::GridSearch { step } => self.best_grid_candidate(points, step)?,
        };
        if let Some(result) = &best {
            debug!(
                strategy = %self.config.strategy,
                points = points.len(),
                radius,
                chosen = %result.point.id(),
                covered = result.covered_count,
                "selected best coverage"
            );
        }
        Ok(best)
    }

    fn best_grid_candidate(
        &self,
        points: &PointSet,
        step: f64,
    ) -> Result<Option<CoverageResult>, SelectError> {
        let Some(bounds) = points.bounding_box() else {
            return Ok(None);
        };
        let grid = Grid::new(bounds, step, self.config.max_grid_points)?;
        let center = bounds.center();
        let origin = Point::synthetic(center);

        let mut best: Option<(CoverageResult, f64)> = None;
        for position in grid.positions() {
            let covered = covered_by(points, position, self.config.radius);
            let offset = origin.distance_to(position);
            let better = match &best {
                None => true,
                Some((current, current_offset)) => {
                    covered.len() > current.covered_count
                        || (covered.len() == current.covered_count && offset < *current_offset)
                }
            };
            if better {
                best = Some((CoverageResult::new(Point::synthetic(position), covered), offset));
            }
        }
        debug!(candidates = grid.len(), "grid search complete");
        Ok(best.map(|(result, _)| result))
    }
}

/// Evaluate every point of `points` in order and keep the first one with
/// the highest coverage.
fn best_point_candidate<F>(
    points: &PointSet,
    mut coverage: F,
) -> Result<Option<CoverageResult>, SelectError>
where
    F: FnMut(&Point) -> Result<BTreeSet<PointId>, SelectError>,
{
    points
        .iter()
        .try_fold(None, |best: Option<CoverageResult>, candidate| -> Result<_, SelectError> {
            let covered = coverage(candidate)?;
            Ok(match best {
                Some(current) if current.covered_count >= covered.len() => Some(current),
                _ => Some(CoverageResult::new(*candidate, covered)),
            })
        })
}

/// Select the best-covering candidate for `radius` and `strategy`.
///
/// Convenience wrapper around [`CoverageSelector`] using the default grid
/// limit. Returns `Ok(None)` when `points` is empty.
pub fn select_best_coverage(
    points: &PointSet,
    radius: f64,
    strategy: Strategy,
) -> Result<Option<CoverageResult>, SelectError> {
    CoverageSelector::new(SelectorConfig::new(radius, strategy))?.select(points)
}

/// Regular lattice spanning a bounding box.
///
/// Each axis holds `floor(extent / step) + 1` positions starting at the
/// box minimum, so a degenerate axis still contributes one position.
struct Grid {
    bounds: BoundingBox,
    step: f64,
    counts: [u64; 3],
}

impl Grid {
    fn new(bounds: BoundingBox, step: f64, limit: u64) -> Result<Self, SelectError> {
        let per_axis = Axis::ALL.map(|axis| (bounds.extent(axis) / step).floor() + 1.0);
        let total: f64 = per_axis.iter().product();
        if !total.is_finite() || total > limit as f64 {
            return Err(SelectError::GridTooLarge {
                points: total,
                limit,
            });
        }
        Ok(Self {
            bounds,
            step,
            counts: per_axis.map(|n| n as u64),
        })
    }

    fn len(&self) -> u64 {
        self.counts.iter().product()
    }

    fn coordinate(&self, axis: Axis, i: u64) -> f64 {
        let a = axis.index();
        (self.bounds.min[a] + i as f64 * self.step).min(self.bounds.max[a])
    }

    /// Positions in scan order: x outermost, z innermost.
    fn positions(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        let [nx, ny, nz] = self.counts;
        (0..nx).flat_map(move |i| {
            (0..ny).flat_map(move |j| {
                (0..nz).map(move |k| {
                    [
                        self.coordinate(Axis::X, i),
                        self.coordinate(Axis::Y, j),
                        self.coordinate(Axis::Z, k),
                    ]
                })
            })
        })
    }
}
