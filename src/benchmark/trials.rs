//! Timed trial runner
//!
//! Repeatedly invokes a strategy and records wall-clock nanoseconds per
//! invocation. Only the strategy call sits between the two timestamps.

use std::hint::black_box;
use std::time::Instant;

use tracing::debug;

use crate::utils::Result;

/// Run `trial_count` timed invocations of `strategy`, returning one duration
/// (ns) per trial in execution order
pub fn time_trials<F>(
    strategy: F,
    iterations: u64,
    num_threads: usize,
    trial_count: usize,
) -> Result<Vec<u64>>
where
    F: FnMut(u64, usize) -> Result<u64>,
{
    time_trials_with_progress(strategy, iterations, num_threads, trial_count, |_, _| {})
}

/// Same as [`time_trials`], calling `on_trial(index, elapsed_ns)` after each trial
///
/// The first strategy error stops the loop and is returned.
pub fn time_trials_with_progress<F, P>(
    mut strategy: F,
    iterations: u64,
    num_threads: usize,
    trial_count: usize,
    mut on_trial: P,
) -> Result<Vec<u64>>
where
    F: FnMut(u64, usize) -> Result<u64>,
    P: FnMut(usize, u64),
{
    let mut times = Vec::with_capacity(trial_count);

    for trial in 0..trial_count {
        let start = Instant::now();
        let value = strategy(iterations, num_threads)?;
        let elapsed = start.elapsed();

        black_box(value);
        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        debug!("trial {}: {} ns (counter={})", trial + 1, elapsed_ns, value);

        times.push(elapsed_ns);
        on_trial(trial, elapsed_ns);
    }

    Ok(times)
}
