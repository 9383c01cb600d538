//! Buffer Statistics Module
//!
//! Tracks buffer activity: hits, misses, refreshes, evictions, and expirations.

use serde::Serialize;

// == Buffer Stats ==
/// Tracks buffer performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BufferStats {
    /// Number of successful gets
    pub hits: u64,
    /// Number of failed gets (id not found or expired)
    pub misses: u64,
    /// Number of puts against an id that was already buffered
    pub refreshes: u64,
    /// Number of entries evicted to make room under the capacity limit
    pub evictions: u64,
    /// Number of entries removed because their timeout window elapsed
    pub expirations: u64,
    /// Current number of entries in the buffer
    pub total_entries: usize,
}

impl BufferStats {
    // == Constructor ==
    /// Creates a new BufferStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the get hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no gets have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    /// Adds `count` stale entries to the expiration counter.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
