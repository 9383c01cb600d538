//! Buffer Store Module
//!
//! Main buffer engine combining HashMap storage with recency tracking and
//! timeout expiry, guarded by a single lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::buffer::{
    BufferEntry, BufferStats, Bufferable, RecencyIndex, DEFAULT_CAPACITY, DEFAULT_TIMEOUT,
};
use crate::config::BufferConfig;
use crate::error::{BufferError, Result};

// == Buffer State ==
/// Everything behind the buffer lock. Each public operation runs as one
/// critical section over this state.
#[derive(Debug)]
struct BufferState<B> {
    /// Id -> entry storage
    entries: HashMap<String, BufferEntry<B>>,
    /// LRU access order
    recency: RecencyIndex,
    /// Activity counters
    stats: BufferStats,
}

impl<B> BufferState<B> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyIndex::new(),
            stats: BufferStats::new(),
        }
    }

    /// Removes every entry that has gone unaccessed for longer than `timeout`.
    fn sweep_expired(&mut self, now: Instant, timeout: Duration) -> usize {
        let expired_ids: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired_ids {
            self.remove_entry(id);
        }

        let count = expired_ids.len();
        if count > 0 {
            self.stats.record_expirations(count);
            debug!("Freshness sweep: removed {} expired entries", count);
        }
        count
    }

    fn insert_entry(&mut self, id: String, value: B, now: Instant) {
        let seq = self.recency.next_seq();
        self.recency.insert(seq, &id);
        self.entries.insert(id, BufferEntry::new(value, now, seq));
    }

    fn remove_entry(&mut self, id: &str) -> Option<BufferEntry<B>> {
        let entry = self.entries.remove(id)?;
        self.recency.remove(entry.seq);
        Some(entry)
    }

    /// Marks an entry as accessed at `now`.
    fn refresh_entry(&mut self, id: &str, now: Instant) -> Option<&mut BufferEntry<B>> {
        let entry = self.entries.get_mut(id)?;
        let seq = self.recency.touch(entry.seq, id);
        entry.refresh(now, seq);
        Some(entry)
    }

    /// Evicts the least recently used entry.
    fn evict_oldest(&mut self) -> Option<String> {
        let id = self.recency.evict_oldest()?;
        self.entries.remove(&id);
        self.stats.record_eviction();
        debug!("Evicted least recently used entry '{}'", id);
        Some(id)
    }

    /// Removes `id` if it is stale. Returns true when it was removed.
    fn expire_if_stale(&mut self, id: &str, now: Instant, timeout: Duration) -> bool {
        let stale = self
            .entries
            .get(id)
            .is_some_and(|entry| entry.is_expired(now, timeout));
        if stale {
            self.remove_entry(id);
            self.stats.record_expirations(1);
            debug!("Entry '{}' expired", id);
        }
        stale
    }
}

// == Fsft Buffer ==
/// A fixed-size, fixed-timeout buffer of [`Bufferable`] values.
///
/// Holds up to `capacity` values keyed by [`Bufferable::id`]. When full, the
/// least recently accessed value is evicted to make room. Independently, a
/// value that has not been put, read, or touched within `timeout` is stale
/// and is treated as absent.
///
/// Expiry is lazy: stale entries are dropped when an operation addresses
/// them, and every [`put`](FsftBuffer::put) sweeps the whole buffer first.
/// For tighter bounds a background sweep can be run with
/// [`spawn_sweeper`](crate::tasks::spawn_sweeper); it takes the same lock as
/// every other operation.
///
/// All operations take `&self`, never block on I/O, and are atomic with
/// respect to each other. Share across threads with `Arc`.
#[derive(Debug)]
pub struct FsftBuffer<B> {
    state: Mutex<BufferState<B>>,
    capacity: usize,
    timeout: Duration,
}

impl<B: Bufferable + Clone> FsftBuffer<B> {
    // == Constructor ==
    /// Creates a buffer with a fixed capacity and timeout window.
    ///
    /// # Errors
    /// [`BufferError::Configuration`] if `capacity` is zero or `timeout` is zero.
    pub fn new(capacity: usize, timeout: Duration) -> Result<Self> {
        Self::from_config(&BufferConfig::new(capacity, timeout))
    }

    /// Creates a buffer from a validated configuration.
    ///
    /// The sweep interval is not acted on here; share the buffer and pass it
    /// with the same config to
    /// [`spawn_configured_sweeper`](crate::tasks::spawn_configured_sweeper).
    pub fn from_config(config: &BufferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(BufferState::new()),
            capacity: config.capacity,
            timeout: config.timeout,
        })
    }

    // == Put ==
    /// Adds a value, or refreshes the one already stored under its id.
    ///
    /// Expired entries are swept before capacity is checked. If the id is
    /// already buffered the stored value is replaced, its recency refreshed,
    /// and `false` is returned without touching occupancy. Otherwise, if the
    /// buffer is full, the least recently used entry is evicted and the new
    /// value inserted, returning `true`.
    ///
    /// An absent value (`None`) stores nothing and returns `false`.
    pub fn put<V: Into<Option<B>>>(&self, value: V) -> bool {
        let Some(value) = value.into() else {
            return false;
        };
        let id = value.id().to_string();

        let mut state = self.state.lock();
        let now = Instant::now();
        state.sweep_expired(now, self.timeout);

        if let Some(entry) = state.refresh_entry(&id, now) {
            entry.value = value;
            state.stats.record_refresh();
            debug!("Refreshed existing entry '{}'", id);
            return false;
        }

        if state.entries.len() >= self.capacity {
            state.evict_oldest();
        }
        state.insert_entry(id, value, now);
        true
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `id`.
    ///
    /// A successful read counts as an access and refreshes recency.
    ///
    /// # Errors
    /// - [`BufferError::InvalidArgument`] if `id` is `None`
    /// - [`BufferError::NotFound`] if nothing is stored under `id`
    /// - [`BufferError::Expired`] if the entry went stale; it is removed
    pub fn get<'a>(&self, id: impl Into<Option<&'a str>>) -> Result<B> {
        let id = require_id(id.into())?;

        let mut state = self.state.lock();
        let now = Instant::now();

        if state.expire_if_stale(id, now, self.timeout) {
            state.stats.record_miss();
            return Err(BufferError::Expired(id.to_string()));
        }

        let value = state.refresh_entry(id, now).map(|entry| entry.value.clone());
        match value {
            Some(value) => {
                state.stats.record_hit();
                Ok(value)
            }
            None => {
                state.stats.record_miss();
                Err(BufferError::NotFound(id.to_string()))
            }
        }
    }

    // == Touch ==
    /// Refreshes the last access time of the entry stored under `id`,
    /// delaying its timeout.
    ///
    /// Returns `Ok(false)` when nothing fresh is stored under `id`. A stale
    /// entry is treated as absent and removed.
    ///
    /// # Errors
    /// [`BufferError::InvalidArgument`] if `id` is `None`.
    pub fn touch<'a>(&self, id: impl Into<Option<&'a str>>) -> Result<bool> {
        let id = require_id(id.into())?;

        let mut state = self.state.lock();
        let now = Instant::now();

        if state.expire_if_stale(id, now, self.timeout) {
            return Ok(false);
        }
        Ok(state.refresh_entry(id, now).is_some())
    }

    // == Remove ==
    /// Removes the entry stored under `id` and returns its value.
    ///
    /// # Errors
    /// Same as [`get`](FsftBuffer::get). A stale entry is still removed.
    pub fn remove<'a>(&self, id: impl Into<Option<&'a str>>) -> Result<B> {
        let id = require_id(id.into())?;

        let mut state = self.state.lock();
        let now = Instant::now();

        if state.expire_if_stale(id, now, self.timeout) {
            return Err(BufferError::Expired(id.to_string()));
        }
        state
            .remove_entry(id)
            .map(|entry| entry.value)
            .ok_or_else(|| BufferError::NotFound(id.to_string()))
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the buffer.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let mut state = self.state.lock();
        let now = Instant::now();
        state.sweep_expired(now, self.timeout)
    }

    // == Stats ==
    /// Returns a snapshot of the buffer statistics.
    pub fn stats(&self) -> BufferStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including stale entries not yet swept.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<B: Bufferable + Clone> Default for FsftBuffer<B> {
    /// A buffer holding [`DEFAULT_CAPACITY`] values for [`DEFAULT_TIMEOUT`].
    fn default() -> Self {
        Self {
            state: Mutex::new(BufferState::new()),
            capacity: DEFAULT_CAPACITY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn require_id(id: Option<&str>) -> Result<&str> {
    id.ok_or_else(|| BufferError::InvalidArgument("id must be present".to_string()))
}
