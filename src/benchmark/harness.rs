//! Concurrent increment harness
//!
//! One invocation owns one zero-initialized counter, fans out `num_threads`
//! fresh worker threads that each apply `iterations` increments, joins every
//! worker, and reads the final value back. Nothing survives the call.
//!
//! The counter is the only synchronization point between workers. There is no
//! lock anywhere in this path.

use std::sync::atomic::AtomicU64;
use std::thread;

use tracing::trace;

use super::ordering::MemoryOrder;
use crate::utils::{BenchmarkError, Result};

/// Lifecycle of a single harness invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessPhase {
    Idle,
    Spawning,
    Running,
    Joining,
    Complete,
}

/// Runs one generation of worker threads against a fresh counter
#[derive(Debug)]
pub struct Harness {
    order: MemoryOrder,
    iterations: u64,
    num_threads: usize,
    phase: HarnessPhase,
    /// Workers actually started by the last `run`
    workers_spawned: usize,
}

impl Harness {
    pub fn new(order: MemoryOrder, iterations: u64, num_threads: usize) -> Self {
        Self {
            order,
            iterations,
            num_threads,
            phase: HarnessPhase::Idle,
            workers_spawned: 0,
        }
    }

    pub fn phase(&self) -> HarnessPhase {
        self.phase
    }

    pub fn workers_spawned(&self) -> usize {
        self.workers_spawned
    }

    /// Total increments this invocation must produce
    pub fn expected_total(&self) -> Result<u64> {
        expected_total(self.iterations, self.num_threads)
    }

    fn transition(&mut self, next: HarnessPhase) {
        trace!(
            "harness[{}]: {:?} -> {:?}",
            self.order,
            self.phase,
            next
        );
        self.phase = next;
    }

    /// Spawn, run and join all workers; return the final counter value
    ///
    /// Zero threads or zero iterations short-circuit to 0 before any thread is
    /// created. If a worker cannot be spawned, the workers already running are
    /// joined before the error is returned.
    pub fn run(&mut self) -> Result<u64> {
        self.workers_spawned = 0;
        self.expected_total()?;

        if self.num_threads == 0 || self.iterations == 0 {
            self.transition(HarnessPhase::Complete);
            return Ok(0);
        }

        let counter = AtomicU64::new(0);
        let increment = self.order.increment_ordering();
        let iterations = self.iterations;
        let num_threads = self.num_threads;

        self.transition(HarnessPhase::Spawning);

        let outcome = thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::with_capacity(num_threads);
            let mut spawn_error = None;

            for worker_id in 0..num_threads {
                let counter = &counter;
                let spawned = thread::Builder::new()
                    .name(format!("counter-worker-{}", worker_id))
                    .spawn_scoped(scope, move || {
                        for _ in 0..iterations {
                            counter.fetch_add(1, increment);
                        }
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        spawn_error = Some(e);
                        break;
                    }
                }
            }

            self.workers_spawned = handles.len();
            self.transition(HarnessPhase::Running);
            self.transition(HarnessPhase::Joining);

            let mut panicked = Vec::new();
            for (worker_id, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    panicked.push(worker_id);
                }
            }

            if let Some(e) = spawn_error {
                return Err(BenchmarkError::Spawn(e));
            }
            if !panicked.is_empty() {
                return Err(BenchmarkError::Worker(format!(
                    "counter workers panicked: {:?}",
                    panicked
                )));
            }
            Ok(())
        });

        outcome?;
        let final_value = counter.load(self.order.load_ordering());
        self.transition(HarnessPhase::Complete);
        Ok(final_value)
    }
}

/// `num_threads * iterations`, rejecting products that do not fit the 64-bit counter
pub fn expected_total(iterations: u64, num_threads: usize) -> Result<u64> {
    u64::try_from(num_threads)
        .ok()
        .and_then(|threads| threads.checked_mul(iterations))
        .ok_or(BenchmarkError::CounterOverflow {
            iterations,
            threads: num_threads,
        })
}

/// Increment a shared counter with sequentially consistent ordering
pub fn run_seq_cst(iterations: u64, num_threads: usize) -> Result<u64> {
    Harness::new(MemoryOrder::SeqCst, iterations, num_threads).run()
}

/// Increment a shared counter with relaxed ordering
pub fn run_relaxed(iterations: u64, num_threads: usize) -> Result<u64> {
    Harness::new(MemoryOrder::Relaxed, iterations, num_threads).run()
}

/// Increment a shared counter with acquire-release ordering
pub fn run_acq_rel(iterations: u64, num_threads: usize) -> Result<u64> {
    Harness::new(MemoryOrder::AcqRel, iterations, num_threads).run()
}
