//! Memory-ordering policies under test

use std::sync::atomic::Ordering;

use super::harness::{run_acq_rel, run_relaxed, run_seq_cst};
use crate::utils::Result;

/// Signature shared by the three counter strategies: `(iterations, num_threads) -> final value`
pub type StrategyFn = fn(u64, usize) -> Result<u64>;

/// Atomic memory-ordering policy applied to every increment of the shared counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryOrder {
    /// Sequential consistency: single global order of all atomic operations
    SeqCst,
    /// Atomicity only, no cross-thread ordering
    Relaxed,
    /// Release on write, acquire on read
    AcqRel,
}

impl MemoryOrder {
    /// All policies, in reporting order (baseline first)
    pub const ALL: [MemoryOrder; 3] = [Self::SeqCst, Self::Relaxed, Self::AcqRel];

    /// Parse policy from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seqcst" | "seq-cst" | "seq_cst" => Some(Self::SeqCst),
            "relaxed" => Some(Self::Relaxed),
            "acqrel" | "acq-rel" | "acq_rel" => Some(Self::AcqRel),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeqCst => "seq_cst",
            Self::Relaxed => "relaxed",
            Self::AcqRel => "acq_rel",
        }
    }

    /// Column label used in tables and CSV headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::SeqCst => "SeqCst",
            Self::Relaxed => "Relaxed",
            Self::AcqRel => "AcqRel",
        }
    }

    /// Ordering used for each `fetch_add` on the counter
    #[inline]
    pub fn increment_ordering(&self) -> Ordering {
        match self {
            Self::SeqCst => Ordering::SeqCst,
            Self::Relaxed => Ordering::Relaxed,
            Self::AcqRel => Ordering::AcqRel,
        }
    }

    /// Ordering used for the final read of the counter
    ///
    /// A load cannot carry release semantics (`load(AcqRel)` panics), so the
    /// acquire-release policy reads with its acquire half.
    #[inline]
    pub fn load_ordering(&self) -> Ordering {
        match self {
            Self::SeqCst => Ordering::SeqCst,
            Self::Relaxed => Ordering::Relaxed,
            Self::AcqRel => Ordering::Acquire,
        }
    }

    /// Strategy function implementing this policy
    pub fn strategy(&self) -> StrategyFn {
        match self {
            Self::SeqCst => run_seq_cst,
            Self::Relaxed => run_relaxed,
            Self::AcqRel => run_acq_rel,
        }
    }

    /// Run one harness invocation with this policy and return the final counter value
    pub fn run(&self, iterations: u64, num_threads: usize) -> Result<u64> {
        (self.strategy())(iterations, num_threads)
    }
}

impl std::fmt::Display for MemoryOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
