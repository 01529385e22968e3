//! Concurrent counter benchmark
//!
//! This module provides the multi-threaded benchmark execution system:
//! - MemoryOrder: the three ordering policies and their strategy functions
//! - Harness: fan-out/fan-in of fresh worker threads over one shared counter
//! - time_trials: timed repetition of a strategy
//! - Orchestrator: runs every selected ordering and verifies final counts

pub mod harness;
pub mod orchestrator;
pub mod ordering;
pub mod trials;

pub use harness::{run_acq_rel, run_relaxed, run_seq_cst, Harness, HarnessPhase};
pub use orchestrator::{OrderResult, Orchestrator};
pub use ordering::{MemoryOrder, StrategyFn};
pub use trials::{time_trials, time_trials_with_progress};
