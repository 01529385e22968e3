//! memory-order-bench library
//!
//! Measures how atomic memory orderings affect a shared counter incremented
//! concurrently by many threads, and verifies the final count for each one.

pub mod benchmark;
pub mod config;
pub mod metrics;
pub mod utils;

pub use benchmark::{run_acq_rel, run_relaxed, run_seq_cst, time_trials, MemoryOrder};
pub use utils::{BenchmarkError, Result};
