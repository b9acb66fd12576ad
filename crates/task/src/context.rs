//! Per-iteration context handed in by the harness.

use std::sync::atomic::{AtomicU64, Ordering};

/// What the harness tells one benchmark iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationContext {
    counter: u64,
}

impl IterationContext {
    /// Creates a context for iteration `counter`.
    pub fn new(counter: u64) -> Self {
        Self { counter }
    }

    /// Monotonically varying value used to seed the dataset shuffle.
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

/// Thread-safe source of increasing iteration counters.
///
/// Shared by concurrent iterations so that no two of them see the same
/// shuffle, while a fixed starting value keeps a whole run reproducible.
#[derive(Debug, Default)]
pub struct SeedCounter {
    next: AtomicU64,
}

impl SeedCounter {
    /// Creates a counter whose first value is `start`.
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Returns a context for the next iteration.
    pub fn next_context(&self) -> IterationContext {
        IterationContext::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
