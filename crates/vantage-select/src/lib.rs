//! Coverage selection and dominating-set approximation for Vantage.
//!
//! Two independent questions are answered over a
//! [`PointSet`](vantage_core::PointSet):
//!
//! - **Where should a single viewer go?** [`CoverageSelector`] finds the
//!   position covering the most points within a view radius, either among
//!   the points themselves ([`Strategy::BruteForce`],
//!   [`Strategy::IndexAccelerated`]) or on a regular grid spanning their
//!   bounding box ([`Strategy::GridSearch`]).
//! - **Which points should host viewers so that every point is seen?**
//!   [`approximate`] greedily builds a dominating set over a
//!   [`ProximityGraph`](vantage_space::ProximityGraph).
//!
//! All operations are synchronous and pure: inputs are borrowed, never
//! mutated, and every tie is broken deterministically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod coverage;
pub mod dominating;
pub mod error;

pub use config::{SelectorConfig, DEFAULT_MAX_GRID_POINTS};
pub use coverage::{covered_by, select_best_coverage, CoverageResult, CoverageSelector, Strategy};
pub use dominating::{approximate, DominatingSet, DominatingSetApproximator, GreedyStep};
pub use error::SelectError;
