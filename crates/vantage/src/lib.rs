//! Vantage: choosing viewpoints that see the most of a 3-D point set.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Vantage sub-crates. For most users, adding `vantage` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use vantage::prelude::*;
//!
//! // Three sites near null island and one far away.
//! let sites = [(0.0, 0.0), (0.0, 0.05), (0.05, 0.0), (45.0, 90.0)];
//! let points = PointSet::new(sites.iter().enumerate().map(|(i, &(lat, lon))| {
//!     Point::from_geo(i as i64, GeoCoord::new(lat, lon).unwrap())
//! }))
//! .unwrap();
//!
//! // Best single viewpoint with an 8 km view radius.
//! let best = select_best_coverage(&points, 8.0, Strategy::IndexAccelerated)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(best.point.id(), PointId(0));
//! assert_eq!(best.covered_count, 3);
//!
//! // A set of viewpoints that together see every site.
//! let graph = ProximityGraph::build(&points, 8.0).unwrap();
//! let cameras = approximate(&graph);
//! assert!(cameras.dominates(&graph));
//! assert_eq!(cameras.len(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vantage-core` | Ids, points, point sets, geographic conversion |
//! | [`space`] | `vantage-space` | k-d tree range queries and proximity graphs |
//! | [`select`] | `vantage-select` | Coverage selection and dominating sets |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`vantage-core`).
///
/// [`types::PointId`], [`types::Point`], [`types::PointSet`] and the
/// latitude/longitude conversions.
pub use vantage_core as types;

/// Spatial structures (`vantage-space`).
///
/// [`space::KdTree`] for exact radius queries and [`space::ProximityGraph`]
/// for threshold graphs.
pub use vantage_space as space;

/// Selection algorithms (`vantage-select`).
///
/// [`select::CoverageSelector`] for single-viewpoint placement and
/// [`select::approximate`] for greedy dominating sets.
pub use vantage_select as select;

/// Common imports for typical Vantage usage.
///
/// ```rust
/// use vantage::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use vantage_core::{GeoCoord, Point, PointId, PointSet};

    // Errors
    pub use vantage_core::CoreError;
    pub use vantage_select::SelectError;
    pub use vantage_space::SpaceError;

    // Space
    pub use vantage_space::{KdTree, ProximityGraph};

    // Selection
    pub use vantage_select::{
        approximate, select_best_coverage, CoverageResult, CoverageSelector, DominatingSet,
        SelectorConfig, Strategy,
    };
}
