//! Service Statistics Module
//!
//! Hit/miss counters for the service layer. Counters are atomics so every
//! request path can bump them through a shared reference without taking a
//! lock.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Service Stats ==
/// Running hit/miss tally, updated concurrently by request handlers.
#[derive(Debug, Default)]
pub struct ServiceStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ServiceStats {
    /// Creates a tally with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh, non-expired lookup.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an absent or expired lookup.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Captures the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Number of lookups answered from a fresh entry
    pub hits: u64,
    /// Number of lookups that had to fill the cache
    pub misses: u64,
}

impl StatsSnapshot {
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
