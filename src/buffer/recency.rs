//! Recency Index Module
//!
//! Orders buffered ids by access sequence for LRU eviction.

use std::collections::BTreeMap;

// == Recency Index ==
/// Tracks access order for LRU eviction.
///
/// Ids are keyed by the access sequence number recorded alongside their
/// `last_access` timestamp. Sequence numbers only grow, and the buffer reads
/// the clock under the same lock that hands them out, so the lowest sequence
/// is always the oldest timestamp. Entries with equal timestamps fall back to
/// the order in which they were accessed.
#[derive(Debug, Default)]
pub struct RecencyIndex {
    /// Access sequence -> id, first = least recently used
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl RecencyIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Next Sequence ==
    /// Reserves the next access sequence number.
    pub fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // == Insert ==
    /// Records `id` as accessed at `seq`.
    pub fn insert(&mut self, seq: u64, id: &str) {
        self.order.insert(seq, id.to_string());
    }

    // == Touch ==
    /// Moves `id` from its previous sequence to a fresh one, returning the new sequence.
    pub fn touch(&mut self, previous: u64, id: &str) -> u64 {
        let removed = self.order.remove(&previous);
        debug_assert_eq!(removed.as_deref(), Some(id), "recency index out of sync");
        let seq = self.next_seq();
        self.order.insert(seq, removed.unwrap_or_else(|| id.to_string()));
        seq
    }

    // == Remove ==
    /// Removes the id recorded at `seq`.
    pub fn remove(&mut self, seq: u64) -> Option<String> {
        self.order.remove(&seq)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used id.
    ///
    /// Returns None if the index is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, id)| id)
    }

    // == Peek Oldest ==
    /// Returns the least recently used id without removing it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, id)| id.as_str())
    }

    // == Length ==
    /// Returns the number of tracked ids.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
