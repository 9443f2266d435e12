//! Error types for spatial queries and graph construction.

use std::error::Error;
use std::fmt;

use vantage_core::{Axis, CoreError, PointId};

/// Errors arising from index queries or proximity-graph construction.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceError {
    /// A query target has a NaN or infinite coordinate.
    NonFiniteTarget {
        /// Which coordinate is bad.
        axis: Axis,
        /// The offending value.
        value: f64,
    },
    /// A radius is NaN.
    NonFiniteRadius {
        /// The offending value.
        value: f64,
    },
    /// A graph was requested with a negative connection radius.
    ///
    /// Range queries do not report this: a negative query radius simply
    /// matches nothing.
    NegativeRadius {
        /// The offending value.
        value: f64,
    },
    /// An edge refers to a node that was not declared.
    UnknownNode {
        /// The undeclared identifier.
        id: PointId,
    },
    /// An edge connects a node to itself.
    SelfLoop {
        /// The node in question.
        id: PointId,
    },
    /// Invalid node or point data.
    Core(CoreError),
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteTarget { axis, value } => {
                write!(f, "query target has non-finite {axis} coordinate {value}")
            }
            Self::NonFiniteRadius { value } => write!(f, "radius {value} is not a number"),
            Self::NegativeRadius { value } => write!(f, "radius {value} is negative"),
            Self::UnknownNode { id } => write!(f, "edge refers to unknown node {id}"),
            Self::SelfLoop { id } => write!(f, "self-loop on node {id}"),
            Self::Core(e) => write!(f, "core: {e}"),
        }
    }
}

impl Error for SpaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for SpaceError {
    fn from(e: CoreError) -> Self {
        Self::Core(e)
    }
}
