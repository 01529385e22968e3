//! Error types for memory-order-bench

use std::io;
use thiserror::Error;

/// Top-level library error
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameter: {name} must be non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: i64 },

    #[error("Counter overflow: {threads} threads x {iterations} iterations exceeds u64::MAX")]
    CounterOverflow { iterations: u64, threads: usize },

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
