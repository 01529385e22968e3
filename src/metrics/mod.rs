//! Metrics collection and reporting
//!
//! This module provides:
//! - Trial statistics (mean, spread, percentiles)
//! - Console reporting
//! - CSV/JSON export

pub mod reporter;
pub mod stats;

pub use reporter::{to_json, write_csv, write_csv_file, write_json_file, MetricsReporter};
pub use stats::TrialStats;
