//! Error types for coverage selection.

use std::error::Error;
use std::fmt;

use vantage_space::SpaceError;

/// Errors detected by [`SelectorConfig::validate()`](crate::SelectorConfig::validate)
/// or raised while evaluating candidates.
///
/// An empty point set is not an error: selection returns `Ok(None)`.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectError {
    /// View radius is NaN or negative.
    InvalidRadius {
        /// The invalid value.
        value: f64,
    },
    /// Grid step is NaN, infinite, zero, or negative.
    InvalidGridStep {
        /// The invalid value.
        value: f64,
    },
    /// The grid candidate limit is zero.
    InvalidGridLimit,
    /// The grid would enumerate more candidates than allowed.
    GridTooLarge {
        /// Number of candidates the grid would contain.
        points: f64,
        /// Configured upper bound.
        limit: u64,
    },
    /// A spatial query failed.
    Space(SpaceError),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius { value } => {
                write!(f, "radius must be a non-negative number, got {value}")
            }
            Self::InvalidGridStep { value } => {
                write!(f, "grid step must be finite and positive, got {value}")
            }
            Self::InvalidGridLimit => write!(f, "max_grid_points must be at least 1"),
            Self::GridTooLarge { points, limit } => {
                write!(f, "grid of {points} candidates exceeds limit of {limit}")
            }
            Self::Space(e) => write!(f, "space: {e}"),
        }
    }
}

impl Error for SelectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for SelectError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
