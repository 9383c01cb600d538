//! Buffer Entry Module
//!
//! Defines the structure for individual buffered objects with freshness tracking.

use std::time::{Duration, Instant};

// == Buffer Entry ==
/// A buffered value plus the time it was last accessed.
#[derive(Debug, Clone)]
pub struct BufferEntry<B> {
    /// The stored value
    pub value: B,
    /// Last put, successful get, or touch
    pub last_access: Instant,
    /// Access sequence number, unique per buffer, ordering entries with equal timestamps
    pub seq: u64,
}

impl<B> BufferEntry<B> {
    // == Constructor ==
    /// Creates an entry accessed at `now`.
    pub fn new(value: B, now: Instant, seq: u64) -> Self {
        Self {
            value,
            last_access: now,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has gone unaccessed for longer than `timeout`.
    ///
    /// Boundary condition: an entry whose idle time equals the timeout exactly
    /// is still fresh; it expires only once the idle time is strictly greater.
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        self.idle(now) > timeout
    }

    // == Idle ==
    /// Time since the last access, saturating at zero.
    pub fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_access)
    }

    // == Refresh ==
    /// Marks the entry as accessed at `now` with a new sequence number.
    pub fn refresh(&mut self, now: Instant, seq: u64) {
        self.last_access = now;
        self.seq = seq;
    }
}
