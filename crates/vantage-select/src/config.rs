//! Selector configuration and validation.
//!
//! [`SelectorConfig`] is the input for constructing a
//! [`CoverageSelector`](crate::CoverageSelector).
//! [`validate()`](SelectorConfig::validate) checks every invariant up
//! front so no candidate is evaluated against an invalid argument.

use crate::coverage::Strategy;
use crate::error::SelectError;

/// Default upper bound on the number of grid-search candidates.
pub const DEFAULT_MAX_GRID_POINTS: u64 = 2_000_000;

/// Complete configuration for a coverage selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    /// View radius. Must be non-negative; `f64::INFINITY` covers everything.
    pub radius: f64,
    /// Candidate strategy.
    pub strategy: Strategy,
    /// Maximum number of grid candidates [`Strategy::GridSearch`] may
    /// enumerate. Default: [`DEFAULT_MAX_GRID_POINTS`].
    pub max_grid_points: u64,
}

impl SelectorConfig {
    /// Configuration with the default grid limit.
    pub fn new(radius: f64, strategy: Strategy) -> Self {
        Self {
            radius,
            strategy,
            max_grid_points: DEFAULT_MAX_GRID_POINTS,
        }
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), SelectError> {
        // 1. Radius must be a non-negative number.
        if self.radius.is_nan() || self.radius < 0.0 {
            return Err(SelectError::InvalidRadius { value: self.radius });
        }
        // 2. Grid step, if any, must be finite and positive.
        if let Strategy::GridSearch { step } = self.strategy {
            if !step.is_finite() || step <= 0.0 {
                return Err(SelectError::InvalidGridStep { value: step });
            }
        }
        // 3. The grid limit must allow at least the degenerate one-point grid.
        if self.max_grid_points == 0 {
            return Err(SelectError::InvalidGridLimit);
        }
        Ok(())
    }
}
