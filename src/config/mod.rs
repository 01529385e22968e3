//! Configuration module

pub mod benchmark_config;
pub mod cli;

pub use benchmark_config::{BenchmarkConfig, BenchmarkParams};
pub use cli::CliArgs;
