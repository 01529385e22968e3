//! Metrics reporter - output formatting and export
//!
//! Supports multiple output formats:
//! - Console (final counts, summary table, per-trial listing)
//! - CSV (one row per trial plus an Average row)
//! - JSON

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::benchmark::{MemoryOrder, OrderResult};
use crate::config::BenchmarkParams;
use crate::utils::{format_count, format_ns};

/// Console reporter
pub struct MetricsReporter {
    verbose: bool,
}

impl MetricsReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print each ordering's verified counter value against the expected total
    pub fn report_final_values(&self, results: &[OrderResult]) {
        let Some(first) = results.first() else {
            return;
        };

        println!("Final counter values (expected {}):", format_count(first.expected));
        for result in results {
            println!(
                "  {:8} {:>16}  {}",
                format!("{}:", result.order),
                format_count(result.final_value),
                if result.is_correct() { "ok" } else { "MISMATCH" }
            );
        }
    }

    /// Print the per-ordering timing table
    pub fn report_summary(&self, results: &[OrderResult]) {
        if results.is_empty() {
            return;
        }

        let baseline = results
            .iter()
            .find(|r| r.order == MemoryOrder::SeqCst)
            .and_then(|r| r.stats.as_ref());

        println!();
        for result in results {
            let label = format!("{} operations avg (ns)", result.order.label());
            let value = result
                .mean_ns()
                .map(format_count)
                .unwrap_or_else(|| "n/a".to_string());
            println!("| {:<35} | {:>14} |", label, value);
        }

        println!();
        println!(
            "{:10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>10}",
            "Ordering", "Mean", "Min", "Max", "p99", "Stddev", "vs SeqCst"
        );
        println!("{}", "-".repeat(86));

        for result in results {
            let Some(stats) = result.stats.as_ref() else {
                println!("{:10} {:>12}", result.order.label(), "no trials");
                continue;
            };
            let relative = baseline
                .map(|b| format!("{:.2}x", stats.speedup_over(b)))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>10}",
                result.order.label(),
                format_ns(stats.mean_ns),
                format_ns(stats.min_ns),
                format_ns(stats.max_ns),
                format_ns(stats.p99_ns),
                format_ns(stats.stddev_ns as u64),
                relative
            );
        }
    }

    /// Print every trial's timing (verbose only)
    pub fn report_trials(&self, results: &[OrderResult]) {
        if !self.verbose {
            return;
        }

        println!("\nTrial Results:");
        for trial in 0..trial_rows(results) {
            let cells: Vec<String> = results
                .iter()
                .filter_map(|r| {
                    r.durations_ns
                        .get(trial)
                        .map(|ns| format!("{} = {} ns", r.order.label(), ns))
                })
                .collect();
            println!("Trial {}: {}", trial + 1, cells.join(", "));
        }
    }
}

fn trial_rows(results: &[OrderResult]) -> usize {
    results
        .iter()
        .map(|r| r.durations_ns.len())
        .max()
        .unwrap_or(0)
}

/// Write per-trial durations as CSV
///
/// Layout: `Trial,<Label>(ns),...` header, one row per trial, then an
/// `Average` row of integer means (omitted when there were no trials).
pub fn write_csv<W: Write>(out: &mut W, results: &[OrderResult]) -> io::Result<()> {
    let header: Vec<String> = results
        .iter()
        .map(|r| format!("{}(ns)", r.order.label()))
        .collect();
    writeln!(out, "Trial,{}", header.join(","))?;

    for trial in 0..trial_rows(results) {
        let cells: Vec<String> = results
            .iter()
            .map(|r| {
                r.durations_ns
                    .get(trial)
                    .map(|ns| ns.to_string())
                    .unwrap_or_default()
            })
            .collect();
        writeln!(out, "{},{}", trial + 1, cells.join(","))?;
    }

    let means: Option<Vec<String>> = results
        .iter()
        .map(|r| r.mean_ns().map(|m| m.to_string()))
        .collect();
    if let Some(means) = means.filter(|m| !m.is_empty()) {
        writeln!(out, "Average,{}", means.join(","))?;
    }

    Ok(())
}

/// Write CSV results to a file
pub fn write_csv_file(path: &Path, results: &[OrderResult]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_csv(&mut file, results)?;
    file.flush()
}

/// Build the JSON report
pub fn to_json(params: &BenchmarkParams, results: &[OrderResult]) -> serde_json::Value {
    serde_json::json!({
        "config": {
            "iterations": params.iterations,
            "threads": params.threads,
            "trials": params.trials,
        },
        "results": results.iter().map(|r| {
            serde_json::json!({
                "order": r.order.as_str(),
                "expected": r.expected,
                "final_value": r.final_value,
                "correct": r.is_correct(),
                "durations_ns": r.durations_ns,
                "stats": r.stats,
            })
        }).collect::<Vec<_>>()
    })
}

/// Write the JSON report to a file
pub fn write_json_file(
    path: &Path,
    params: &BenchmarkParams,
    results: &[OrderResult],
) -> io::Result<()> {
    let mut file = File::create(path)?;
    let json = serde_json::to_string_pretty(&to_json(params, results))?;
    writeln!(file, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TrialStats;

    fn result(order: MemoryOrder, durations_ns: Vec<u64>, final_value: u64) -> OrderResult {
        let stats = TrialStats::from_durations(&durations_ns);
        OrderResult {
            order,
            durations_ns,
            final_value,
            expected: 800,
            stats,
        }
    }

    fn csv(results: &[OrderResult]) -> String {
        let mut out = Vec::new();
        write_csv(&mut out, results).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let results = vec![
            result(MemoryOrder::SeqCst, vec![300, 500], 800),
            result(MemoryOrder::Relaxed, vec![100, 200], 800),
            result(MemoryOrder::AcqRel, vec![200, 201], 800),
        ];
        assert_eq!(
            csv(&results),
            "Trial,SeqCst(ns),Relaxed(ns),AcqRel(ns)\n\
             1,300,100,200\n\
             2,500,200,201\n\
             Average,400,150,200\n"
        );
    }

    #[test]
    fn test_csv_without_trials_has_no_average() {
        let results = vec![result(MemoryOrder::Relaxed, vec![], 800)];
        assert_eq!(csv(&results), "Trial,Relaxed(ns)\n");
    }

    #[test]
    fn test_csv_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "memory-order-bench-{}-results.csv",
            std::process::id()
        ));
        let results = vec![result(MemoryOrder::AcqRel, vec![10], 800)];
        write_csv_file(&path, &results).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(content, "Trial,AcqRel(ns)\n1,10\nAverage,10\n");
    }

    #[test]
    fn test_json_report() {
        let params = BenchmarkParams::new(100, 8, 2).unwrap();
        let results = vec![
            result(MemoryOrder::SeqCst, vec![300, 500], 800),
            result(MemoryOrder::Relaxed, vec![100, 200], 799),
        ];
        let json = to_json(&params, &results);
        assert_eq!(json["config"]["threads"], 8);
        assert_eq!(json["results"][0]["order"], "seq_cst");
        assert_eq!(json["results"][0]["correct"], true);
        assert_eq!(json["results"][0]["stats"]["mean_ns"], 400);
        assert_eq!(json["results"][1]["correct"], false);
        assert_eq!(json["results"][1]["durations_ns"][1], 200);
    }

    #[test]
    fn test_json_without_trials_has_null_stats() {
        let params = BenchmarkParams::new(100, 8, 0).unwrap();
        let results = vec![result(MemoryOrder::SeqCst, vec![], 800)];
        let json = to_json(&params, &results);
        assert!(json["results"][0]["stats"].is_null());
    }

    #[test]
    fn test_trial_rows() {
        let results = vec![
            result(MemoryOrder::SeqCst, vec![1, 2, 3], 800),
            result(MemoryOrder::Relaxed, vec![1], 800),
        ];
        assert_eq!(trial_rows(&results), 3);
        assert_eq!(trial_rows(&[]), 0);
    }
}
