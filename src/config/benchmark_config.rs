//! Benchmark configuration derived from CLI arguments

use std::fmt;
use std::path::PathBuf;

use super::cli::CliArgs;
use crate::benchmark::harness::expected_total;
use crate::benchmark::MemoryOrder;
use crate::utils::{BenchmarkError, Result};

/// Immutable inputs for one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkParams {
    /// Increments per worker thread
    pub iterations: u64,
    /// Worker threads per harness invocation
    pub threads: usize,
    /// Timed trials per ordering
    pub trials: usize,
}

impl BenchmarkParams {
    /// Build parameters from signed counts, rejecting negatives
    ///
    /// Zero is accepted for every count.
    pub fn new(iterations: i64, threads: i64, trials: i64) -> Result<Self> {
        Ok(Self {
            iterations: non_negative("iterations", iterations)?,
            threads: non_negative_usize("threads", threads)?,
            trials: non_negative_usize("trials", trials)?,
        })
    }

    /// Final counter value every ordering must produce
    pub fn expected_total(&self) -> Result<u64> {
        expected_total(self.iterations, self.threads)
    }
}

impl fmt::Display for BenchmarkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iterations={}, threads={}, trials={}",
            self.iterations, self.threads, self.trials
        )
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| BenchmarkError::InvalidParameter { name, value })
}

fn non_negative_usize(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| BenchmarkError::InvalidParameter { name, value })
}

/// Complete benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub params: BenchmarkParams,
    pub orders: Vec<MemoryOrder>,

    // Output
    pub csv_output: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

impl BenchmarkConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        args.validate().map_err(BenchmarkError::Config)?;

        let params = BenchmarkParams::new(args.iterations, args.threads, args.trials)?;
        // Reject overflowing totals up front rather than after the first trial
        params.expected_total()?;

        let orders = match args.orders {
            Some(ref names) => parse_orders(names)?,
            None => MemoryOrder::ALL.to_vec(),
        };

        Ok(Self {
            params,
            orders,
            csv_output: if args.no_csv {
                None
            } else {
                Some(args.csv_output.clone())
            },
            output_path: args.output.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Configuration for library callers: all orderings, no file output
    pub fn new(params: BenchmarkParams) -> Self {
        Self {
            params,
            orders: MemoryOrder::ALL.to_vec(),
            csv_output: None,
            output_path: None,
            quiet: true,
            verbose: false,
        }
    }
}

fn parse_orders(names: &[String]) -> Result<Vec<MemoryOrder>> {
    let mut orders = Vec::with_capacity(names.len());
    for name in names {
        let order = MemoryOrder::parse(name.trim()).ok_or_else(|| {
            BenchmarkError::Config(format!("Unknown memory ordering: {}", name))
        })?;
        if orders.contains(&order) {
            return Err(BenchmarkError::Config(format!(
                "Memory ordering listed twice: {}",
                order
            )));
        }
        orders.push(order);
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Result<BenchmarkConfig> {
        let mut full = vec!["test"];
        full.extend_from_slice(argv);
        BenchmarkConfig::from_cli(&CliArgs::parse_from(full))
    }

    #[test]
    fn test_from_cli_defaults() {
        let config = parse(&["-n", "100000", "-t", "10"]).unwrap();
        assert_eq!(config.params.iterations, 100_000);
        assert_eq!(config.params.threads, 8);
        assert_eq!(config.params.trials, 10);
        assert_eq!(config.params.expected_total().unwrap(), 800_000);
        assert_eq!(config.orders, MemoryOrder::ALL.to_vec());
        assert_eq!(config.csv_output, Some(PathBuf::from("results.csv")));
    }

    #[test]
    fn test_negative_counts_rejected() {
        let err = parse(&["-n", "-1", "-t", "10"]).unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::InvalidParameter {
                name: "iterations",
                value: -1
            }
        ));

        let err = parse(&["-n", "1", "-t", "-3"]).unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::InvalidParameter { name: "trials", .. }
        ));

        let err = parse(&["-n", "1", "-t", "1", "--threads", "-2"]).unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::InvalidParameter { name: "threads", .. }
        ));
    }

    #[test]
    fn test_zero_counts_accepted() {
        let config = parse(&["-n", "0", "-t", "0", "--threads", "0"]).unwrap();
        assert_eq!(config.params.expected_total().unwrap(), 0);
    }

    #[test]
    fn test_overflow_rejected() {
        let big = i64::MAX.to_string();
        let err = parse(&["-n", big.as_str(), "-t", "1", "--threads", "4"]).unwrap_err();
        assert!(matches!(err, BenchmarkError::CounterOverflow { .. }));
    }

    #[test]
    fn test_order_selection() {
        let config = parse(&["-n", "1", "-t", "1", "--orders", "acq_rel,seq-cst"]).unwrap();
        assert_eq!(config.orders, vec![MemoryOrder::AcqRel, MemoryOrder::SeqCst]);

        assert!(matches!(
            parse(&["-n", "1", "-t", "1", "--orders", "consume"]),
            Err(BenchmarkError::Config(_))
        ));
        assert!(matches!(
            parse(&["-n", "1", "-t", "1", "--orders", "relaxed,RELAXED"]),
            Err(BenchmarkError::Config(_))
        ));
    }

    #[test]
    fn test_no_csv() {
        let config = parse(&["-n", "1", "-t", "1", "--no-csv"]).unwrap();
        assert!(config.csv_output.is_none());
    }

    #[test]
    fn test_params_display() {
        let params = BenchmarkParams::new(10, 2, 3).unwrap();
        assert_eq!(params.to_string(), "iterations=10, threads=2, trials=3");
    }
}
