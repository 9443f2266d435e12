//! Core types for the Vantage placement toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared by every other crate in the workspace:
//! point identifiers, immutable point sets, error types, and the
//! geographic conversion used to produce Cartesian points.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geo;
pub mod id;
pub mod point;

pub use error::CoreError;
pub use geo::{cartesian_to_lat_lon, lat_lon_to_cartesian, GeoCoord, EARTH_RADIUS_KM};
pub use id::PointId;
pub use point::{Axis, BoundingBox, Point, PointSet};
