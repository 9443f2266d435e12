//! Runtime comparison of the placement algorithms on random globes.
//!
//! Writes one CSV row per algorithm per trial to stdout. Usage:
//!
//! ```text
//! cargo run -p vantage-bench --example comparison -- [trials] [seed]
//! RUST_LOG=debug cargo run -p vantage-bench --example comparison
//! ```

use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vantage_bench::{run_comparison, write_csv, ComparisonConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut config = ComparisonConfig::default();
    let mut args = std::env::args().skip(1);
    if let Some(trials) = args.next() {
        match trials.parse() {
            Ok(n) => config.trials = n,
            Err(e) => {
                eprintln!("invalid trial count {trials:?}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    if let Some(seed) = args.next() {
        match seed.parse() {
            Ok(s) => config.seed = s,
            Err(e) => {
                eprintln!("invalid seed {seed:?}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let records = match run_comparison(&config) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("comparison failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = write_csv(&records, io::stdout().lock()) {
        eprintln!("failed to write results: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
