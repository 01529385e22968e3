//! Summary statistics over a sequence of trial durations

use hdrhistogram::Histogram;
use serde::Serialize;

/// Aggregate timing for one ordering's trials (all values in nanoseconds)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialStats {
    pub trials: usize,
    /// Exact integer mean (truncated)
    pub mean_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    /// Population standard deviation
    pub stddev_ns: f64,
    pub p50_ns: u64,
    pub p95_ns: u64,
    pub p99_ns: u64,
}

impl TrialStats {
    /// Compute statistics; `None` when there are no trials
    pub fn from_durations(durations: &[u64]) -> Option<Self> {
        let min_ns = *durations.iter().min()?;
        let max_ns = *durations.iter().max()?;
        let n = durations.len();

        let sum: u128 = durations.iter().map(|&d| d as u128).sum();
        let mean_ns = (sum / n as u128) as u64;

        let mean = sum as f64 / n as f64;
        let variance = durations
            .iter()
            .map(|&d| {
                let delta = d as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / n as f64;

        // Auto-resizing, 3 significant digits
        let mut histogram = Histogram::<u64>::new(3).expect("Failed to create histogram");
        for &d in durations {
            histogram.record(d).ok();
        }

        Some(Self {
            trials: n,
            mean_ns,
            min_ns,
            max_ns,
            stddev_ns: variance.sqrt(),
            p50_ns: histogram.value_at_percentile(50.0),
            p95_ns: histogram.value_at_percentile(95.0),
            p99_ns: histogram.value_at_percentile(99.0),
        })
    }

    /// How many times faster this is than `baseline` (by mean)
    pub fn speedup_over(&self, baseline: &TrialStats) -> f64 {
        if self.mean_ns == 0 {
            return 0.0;
        }
        baseline.mean_ns as f64 / self.mean_ns as f64
    }

    /// Increments per second at the mean trial time
    pub fn throughput(&self, increments_per_trial: u64) -> f64 {
        if self.mean_ns == 0 {
            return 0.0;
        }
        increments_per_trial as f64 / (self.mean_ns as f64 / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_durations() {
        assert_eq!(TrialStats::from_durations(&[]), None);
    }

    #[test]
    fn test_basic_stats() {
        let stats = TrialStats::from_durations(&[100, 200, 300, 400, 500]).unwrap();
        assert_eq!(stats.trials, 5);
        assert_eq!(stats.mean_ns, 300);
        assert_eq!(stats.min_ns, 100);
        assert_eq!(stats.max_ns, 500);
        assert!((stats.stddev_ns - 141.421).abs() < 0.01);
        assert!(stats.p50_ns >= 200 && stats.p50_ns <= 300);
        assert_eq!(stats.p99_ns, 500);
    }

    #[test]
    fn test_mean_is_truncated_integer() {
        let stats = TrialStats::from_durations(&[1, 2]).unwrap();
        assert_eq!(stats.mean_ns, 1);
    }

    #[test]
    fn test_single_trial() {
        let stats = TrialStats::from_durations(&[42_000]).unwrap();
        assert_eq!(stats.mean_ns, 42_000);
        assert_eq!(stats.stddev_ns, 0.0);
    }

    #[test]
    fn test_speedup_and_throughput() {
        let baseline = TrialStats::from_durations(&[2_000]).unwrap();
        let fast = TrialStats::from_durations(&[1_000]).unwrap();
        assert_eq!(fast.speedup_over(&baseline), 2.0);
        assert!((fast.throughput(1_000) - 1_000_000_000.0).abs() < 1.0);
    }
}
