//! Utility modules

pub mod error;
pub mod format;

pub use error::{BenchmarkError, Result};
pub use format::{format_count, format_ns};
