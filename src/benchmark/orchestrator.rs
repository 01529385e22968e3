//! Benchmark orchestrator
//!
//! Drives the trial runner for each selected memory ordering, then performs one
//! untimed verification run per ordering to obtain its final counter value.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::ordering::MemoryOrder;
use super::trials::time_trials_with_progress;
use crate::config::BenchmarkConfig;
use crate::metrics::TrialStats;
use crate::utils::{format_count, Result};

/// Outcome of all trials for one memory ordering
#[derive(Debug, Clone)]
pub struct OrderResult {
    pub order: MemoryOrder,
    /// Per-trial wall-clock time in nanoseconds, in execution order
    pub durations_ns: Vec<u64>,
    /// Counter value from the untimed verification run
    pub final_value: u64,
    /// `threads * iterations`
    pub expected: u64,
    /// `None` when no trials were run
    pub stats: Option<TrialStats>,
}

impl OrderResult {
    pub fn is_correct(&self) -> bool {
        self.final_value == self.expected
    }

    pub fn mean_ns(&self) -> Option<u64> {
        self.stats.as_ref().map(|s| s.mean_ns)
    }
}

/// Benchmark orchestrator
pub struct Orchestrator {
    config: BenchmarkConfig,
}

impl Orchestrator {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    fn progress_bar(&self, order: MemoryOrder) -> ProgressBar {
        if self.config.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.config.params.trials as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:>8} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_prefix(order.label());
        pb
    }

    /// Time all trials for one ordering, then verify its final count
    pub fn run_order(&self, order: MemoryOrder) -> Result<OrderResult> {
        let params = self.config.params;
        let expected = params.expected_total()?;

        info!("Running {} ({})", order, params);

        let pb = self.progress_bar(order);
        let durations_ns = time_trials_with_progress(
            order.strategy(),
            params.iterations,
            params.threads,
            params.trials,
            |_, elapsed_ns| {
                pb.set_message(format!("{} ns", format_count(elapsed_ns)));
                pb.inc(1);
            },
        )?;
        pb.finish_with_message("done");

        // Untimed: only the final count matters here
        let final_value = order.run(params.iterations, params.threads)?;
        if final_value != expected {
            warn!(
                "{}: final counter {} != expected {}",
                order, final_value, expected
            );
        }

        let stats = TrialStats::from_durations(&durations_ns);
        Ok(OrderResult {
            order,
            durations_ns,
            final_value,
            expected,
            stats,
        })
    }

    /// Run every configured ordering, in configuration order
    pub fn run_all(&self) -> Result<Vec<OrderResult>> {
        self.config
            .orders
            .iter()
            .map(|&order| self.run_order(order))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchmarkParams;

    fn orchestrator(iterations: i64, threads: i64, trials: i64) -> Orchestrator {
        let params = BenchmarkParams::new(iterations, threads, trials).unwrap();
        Orchestrator::new(BenchmarkConfig::new(params))
    }

    #[test]
    fn test_run_all_orders_verified() {
        let results = orchestrator(10_000, 4, 3).run_all().unwrap();
        assert_eq!(results.len(), 3);
        for (result, order) in results.iter().zip(MemoryOrder::ALL) {
            assert_eq!(result.order, order);
            assert_eq!(result.durations_ns.len(), 3);
            assert_eq!(result.expected, 40_000);
            assert!(result.is_correct());
            assert_eq!(result.stats.as_ref().unwrap().trials, 3);
        }
    }

    #[test]
    fn test_zero_trials_still_verifies() {
        let result = orchestrator(1_000, 2, 0)
            .run_order(MemoryOrder::Relaxed)
            .unwrap();
        assert!(result.durations_ns.is_empty());
        assert!(result.stats.is_none());
        assert_eq!(result.mean_ns(), None);
        assert_eq!(result.final_value, 2_000);
    }

    #[test]
    fn test_degenerate_threads() {
        let result = orchestrator(1_000, 0, 2)
            .run_order(MemoryOrder::SeqCst)
            .unwrap();
        assert_eq!(result.final_value, 0);
        assert!(result.is_correct());
    }

    #[test]
    fn test_selected_orders_only() {
        let params = BenchmarkParams::new(100, 2, 1).unwrap();
        let mut config = BenchmarkConfig::new(params);
        config.orders = vec![MemoryOrder::AcqRel];
        let results = Orchestrator::new(config).run_all().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].order, MemoryOrder::AcqRel);
    }
}
