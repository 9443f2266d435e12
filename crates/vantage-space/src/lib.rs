//! Spatial structures for Vantage.
//!
//! This crate provides the two structures every selection algorithm is
//! built on:
//!
//! - [`KdTree`]: a median-split 3-D tree answering exact radius queries
//!   with hyperplane pruning. Results always equal a linear scan.
//! - [`ProximityGraph`]: undirected adjacency between points that lie
//!   within a fixed radius of each other.
//!
//! Both are built once from a [`PointSet`](vantage_core::PointSet) and
//! never mutated afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod kdtree;
pub mod proximity;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use kdtree::KdTree;
pub use proximity::ProximityGraph;
