//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Benchmark atomic memory orderings on a contended shared counter
#[derive(Parser, Debug, Clone)]
#[command(name = "memory-order-bench")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Benchmark Parameters =====
    // Counts are signed so negative input reaches validation instead of clap's parser.
    /// Increments performed by each worker thread
    #[arg(short = 'n', long = "iterations", allow_negative_numbers = true)]
    pub iterations: i64,

    /// Number of timed trials per memory ordering
    #[arg(short = 't', long = "trials", allow_negative_numbers = true)]
    pub trials: i64,

    /// Number of worker threads spawned per trial
    #[arg(short = 'c', long = "threads", default_value_t = 8, allow_negative_numbers = true)]
    pub threads: i64,

    /// Memory orderings to benchmark (seq-cst, relaxed, acq-rel)
    #[arg(long = "orders", value_delimiter = ',')]
    pub orders: Option<Vec<String>>,

    // ===== Output Options =====
    /// CSV file for per-trial results
    #[arg(long = "csv", default_value = "results.csv")]
    pub csv_output: PathBuf,

    /// Do not write the CSV file
    #[arg(long = "no-csv")]
    pub no_csv: bool,

    /// JSON report file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output (per-trial timings)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose {
            return Err("--quiet and --verbose are mutually exclusive".to_string());
        }

        if let Some(ref orders) = self.orders {
            if orders.is_empty() {
                return Err("--orders requires at least one memory ordering".to_string());
            }
        }

        Ok(())
    }
}
