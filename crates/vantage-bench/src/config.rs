//! Comparison run configuration and validation.

use std::error::Error;
use std::fmt;

use vantage_core::CoreError;
use vantage_select::{SelectError, SelectorConfig, Strategy};
use vantage_space::SpaceError;

use crate::report::Algorithm;

/// Errors raised while validating or running a comparison.
#[derive(Debug, PartialEq)]
pub enum ComparisonError {
    /// `trials` is zero.
    NoTrials,
    /// `algorithms` is empty.
    NoAlgorithms,
    /// The node-count range is empty or starts at zero.
    InvalidNodeRange {
        /// Configured lower bound.
        min: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// Sampling produced an invalid point set.
    Core(CoreError),
    /// Building the proximity graph failed.
    Space(SpaceError),
    /// A coverage selection failed or was misconfigured.
    Select(SelectError),
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTrials => write!(f, "trials must be at least 1"),
            Self::NoAlgorithms => write!(f, "no algorithms selected"),
            Self::InvalidNodeRange { min, max } => {
                write!(f, "node range {min}..={max} is empty or starts at zero")
            }
            Self::Core(e) => write!(f, "core: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Select(e) => write!(f, "select: {e}"),
        }
    }
}

impl Error for ComparisonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Core(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Select(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for ComparisonError {
    fn from(e: CoreError) -> Self {
        Self::Core(e)
    }
}

impl From<SpaceError> for ComparisonError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<SelectError> for ComparisonError {
    fn from(e: SelectError) -> Self {
        Self::Select(e)
    }
}

/// Parameters of a runtime comparison.
///
/// Each trial samples between `min_nodes` and `max_nodes` points at
/// uniformly random latitudes and longitudes, builds the proximity graph
/// at `view_radius`, and times every entry of `algorithms` once.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonConfig {
    /// Number of trials. Default: 100.
    pub trials: usize,
    /// Smallest point set sampled. Default: 5.
    pub min_nodes: usize,
    /// Largest point set sampled (inclusive). Default: 10.
    pub max_nodes: usize,
    /// View radius in kilometres. Default: 8.0.
    pub view_radius: f64,
    /// Grid step for [`Algorithm::GridCoverage`]. Default: 0.5.
    pub grid_step: f64,
    /// Algorithms timed in every trial, in order.
    ///
    /// Default: dominating set, brute-force and indexed coverage. Grid
    /// coverage over a globe-wide sample exceeds the grid limit at the
    /// default step, so it is opt-in.
    pub algorithms: Vec<Algorithm>,
    /// Seed for the ChaCha8 sampler. Default: 42.
    pub seed: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            min_nodes: 5,
            max_nodes: 10,
            view_radius: 8.0,
            grid_step: 0.5,
            algorithms: vec![
                Algorithm::DominatingSet,
                Algorithm::BruteForceCoverage,
                Algorithm::IndexedCoverage,
            ],
            seed: 42,
        }
    }
}

impl ComparisonConfig {
    /// Selector configuration used for `algorithm`, or `None` for the
    /// dominating-set approximation.
    pub fn selector_config(&self, algorithm: Algorithm) -> Option<SelectorConfig> {
        let strategy = match algorithm {
            Algorithm::DominatingSet => return None,
            Algorithm::BruteForceCoverage => Strategy::BruteForce,
            Algorithm::IndexedCoverage => Strategy::IndexAccelerated,
            Algorithm::GridCoverage => Strategy::GridSearch {
                step: self.grid_step,
            },
        };
        Some(SelectorConfig::new(self.view_radius, strategy))
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ComparisonError> {
        // 1. At least one trial and one algorithm.
        if self.trials == 0 {
            return Err(ComparisonError::NoTrials);
        }
        if self.algorithms.is_empty() {
            return Err(ComparisonError::NoAlgorithms);
        }
        // 2. Node range must be non-empty and exclude empty point sets.
        if self.min_nodes == 0 || self.min_nodes > self.max_nodes {
            return Err(ComparisonError::InvalidNodeRange {
                min: self.min_nodes,
                max: self.max_nodes,
            });
        }
        // 3. Radius (and grid step, when used) must suit every selector.
        for &algorithm in &self.algorithms {
            if let Some(config) = self.selector_config(algorithm) {
                config.validate()?;
            }
        }
        // 4. The proximity graph rejects the same radii the selectors do,
        //    so the dominating-set path needs the check on its own.
        if self.view_radius.is_nan() || self.view_radius < 0.0 {
            return Err(SelectError::InvalidRadius {
                value: self.view_radius,
            }
            .into());
        }
        Ok(())
    }
}
