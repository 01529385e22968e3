//! Sweep iteration counts at a fixed thread count
//!
//! Doubles the per-thread iteration count from 1,000 up to a maximum and, for
//! each memory ordering, prints the mean trial time and the verified count.
//! Time should grow roughly linearly with iterations; counts must always be exact.

use std::env;

use memory_order_bench::metrics::TrialStats;
use memory_order_bench::utils::{format_count, format_ns};
use memory_order_bench::{time_trials, MemoryOrder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 4 {
        eprintln!("Usage: {} [threads] [max_iterations] [trials]", args[0]);
        std::process::exit(1);
    }

    let threads: usize = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(8);
    let max_iterations: u64 = args
        .get(2)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(1_024_000);
    let trials: usize = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(5);

    println!(
        "Scaling sweep: threads={}, iterations up to {}, trials={}",
        threads,
        format_count(max_iterations),
        trials
    );
    println!(
        "{:>12} {:>10} {:>12} {:>16} {:>6}",
        "Iterations", "Ordering", "Mean", "Final", "OK"
    );
    println!("{}", "-".repeat(60));

    let mut failures = 0;
    let mut iterations = 1_000u64;
    while iterations <= max_iterations {
        for order in MemoryOrder::ALL {
            let durations = time_trials(order.strategy(), iterations, threads, trials)?;
            let mean = TrialStats::from_durations(&durations)
                .map(|s| format_ns(s.mean_ns))
                .unwrap_or_else(|| "n/a".to_string());

            let final_value = order.run(iterations, threads)?;
            let ok = final_value == iterations * threads as u64;
            if !ok {
                failures += 1;
            }

            println!(
                "{:>12} {:>10} {:>12} {:>16} {:>6}",
                format_count(iterations),
                order.label(),
                mean,
                format_count(final_value),
                if ok { "yes" } else { "NO" }
            );
        }
        iterations = match iterations.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }

    if failures > 0 {
        eprintln!("{} runs produced an incorrect final count", failures);
        std::process::exit(1);
    }

    println!("Done!");
    Ok(())
}
