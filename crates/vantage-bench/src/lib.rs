//! Runtime comparison harness for the Vantage placement algorithms.
//!
//! [`run_comparison`] samples random geographic point sets, builds each
//! proximity graph, and times the greedy dominating set alongside the
//! coverage selectors, producing one [`TrialRecord`] per algorithm per
//! trial. [`write_csv`] renders the records for plotting.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod report;

use std::hint::black_box;
use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use vantage_core::{GeoCoord, Point, PointId, PointSet};
use vantage_select::{approximate, CoverageSelector};
use vantage_space::ProximityGraph;

pub use config::{ComparisonConfig, ComparisonError};
pub use report::{write_csv, Algorithm, TrialRecord, CSV_HEADER};

/// Sample `n` points at uniform latitudes and longitudes, ids `1..=n`.
pub fn sample_geo_points(rng: &mut impl Rng, n: usize) -> Result<PointSet, ComparisonError> {
    let mut points = Vec::with_capacity(n);
    for i in 1..=n {
        let lat = rng.random_range(-90.0..=90.0);
        let lon = rng.random_range(-180.0..=180.0);
        points.push(Point::from_geo(PointId(i as i64), GeoCoord::new(lat, lon)?));
    }
    Ok(PointSet::new(points)?)
}

/// Time `algorithm` once on `points` and its proximity `graph`.
fn time_algorithm(
    config: &ComparisonConfig,
    algorithm: Algorithm,
    points: &PointSet,
    graph: &ProximityGraph,
) -> Result<f64, ComparisonError> {
    let selector = config
        .selector_config(algorithm)
        .map(CoverageSelector::new)
        .transpose()?;
    let start = Instant::now();
    match &selector {
        None => {
            black_box(approximate(graph));
        }
        Some(selector) => {
            black_box(selector.select(points)?);
        }
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0)
}

/// Run every trial of `config` and collect the runtimes.
///
/// Sampling is deterministic for a given seed; runtimes are not.
pub fn run_comparison(config: &ComparisonConfig) -> Result<Vec<TrialRecord>, ComparisonError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.trials * config.algorithms.len());

    for trial in 1..=config.trials {
        let node_size = rng.random_range(config.min_nodes..=config.max_nodes);
        let points = sample_geo_points(&mut rng, node_size)?;
        let graph = ProximityGraph::build(&points, config.view_radius)?;

        for &algorithm in &config.algorithms {
            let runtime_ms = time_algorithm(config, algorithm, &points, &graph)?;
            debug!(trial, node_size, %algorithm, runtime_ms, "timed algorithm");
            records.push(TrialRecord {
                trial,
                node_size,
                algorithm,
                runtime_ms,
            });
        }
    }

    info!(
        trials = config.trials,
        records = records.len(),
        seed = config.seed,
        "comparison complete"
    );
    Ok(records)
}
