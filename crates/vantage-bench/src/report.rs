//! Trial records and CSV output.

use std::fmt;
use std::io::{self, Write};

/// Header row written by [`write_csv`].
pub const CSV_HEADER: &str = "trial,nodeSize,algorithm,runtimeMs";

/// Algorithms a comparison can time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Greedy dominating set over the proximity graph.
    DominatingSet,
    /// Coverage selection with linear-scan counting.
    BruteForceCoverage,
    /// Coverage selection with k-d tree range queries.
    IndexedCoverage,
    /// Coverage selection over a regular grid.
    GridCoverage,
}

impl Algorithm {
    /// Every algorithm, in report order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::DominatingSet,
        Algorithm::BruteForceCoverage,
        Algorithm::IndexedCoverage,
        Algorithm::GridCoverage,
    ];

    /// Stable label used in CSV output.
    pub fn label(self) -> &'static str {
        match self {
            Self::DominatingSet => "dominating-set",
            Self::BruteForceCoverage => "brute-force-coverage",
            Self::IndexedCoverage => "indexed-coverage",
            Self::GridCoverage => "grid-coverage",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runtime of one algorithm in one trial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialRecord {
    /// 1-based trial number.
    pub trial: usize,
    /// Number of points sampled for the trial.
    pub node_size: usize,
    /// Algorithm timed.
    pub algorithm: Algorithm,
    /// Wall-clock runtime in milliseconds.
    pub runtime_ms: f64,
}

impl TrialRecord {
    /// CSV row matching [`CSV_HEADER`], runtime rounded to two decimals.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.2}",
            self.trial, self.node_size, self.algorithm, self.runtime_ms
        )
    }
}

/// Write [`CSV_HEADER`] followed by one row per record.
pub fn write_csv<'a>(
    records: impl IntoIterator<Item = &'a TrialRecord>,
    mut out: impl Write,
) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for record in records {
        writeln!(out, "{}", record.to_csv_row())?;
    }
    out.flush()
}
