//! Error types for point-set construction and geographic conversion.

use std::error::Error;
use std::fmt;

use crate::id::PointId;
use crate::point::Axis;

/// Errors arising while constructing points, point sets, or geographic
/// coordinates.
///
/// Every variant is an invalid-argument condition detected at the entry
/// of a constructor; nothing downstream ever sees a partially built value.
#[derive(Clone, Debug, PartialEq)]
pub enum CoreError {
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate {
        /// The point carrying the bad coordinate.
        id: PointId,
        /// Which coordinate is bad.
        axis: Axis,
        /// The offending value.
        value: f64,
    },
    /// Two points in the same set share an identifier.
    DuplicateId {
        /// The repeated identifier.
        id: PointId,
    },
    /// A point uses the identifier reserved for synthetic candidates.
    ReservedId {
        /// The reserved identifier.
        id: PointId,
    },
    /// Latitude is outside `[-90, 90]` or not finite.
    LatitudeOutOfRange {
        /// The offending latitude in degrees.
        value: f64,
    },
    /// Longitude is outside `[-180, 180]` or not finite.
    LongitudeOutOfRange {
        /// The offending longitude in degrees.
        value: f64,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteCoordinate { id, axis, value } => {
                write!(f, "point {id} has non-finite {axis} coordinate {value}")
            }
            Self::DuplicateId { id } => write!(f, "duplicate point id {id}"),
            Self::ReservedId { id } => {
                write!(f, "point id {id} is reserved for synthetic candidates")
            }
            Self::LatitudeOutOfRange { value } => {
                write!(f, "latitude {value} outside [-90, 90]")
            }
            Self::LongitudeOutOfRange { value } => {
                write!(f, "longitude {value} outside [-180, 180]")
            }
        }
    }
}

impl Error for CoreError {}
