//! Buffer Module
//!
//! Provides a fixed-size, fixed-timeout object buffer with lazy expiry and
//! LRU eviction.

mod bufferable;
mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use bufferable::Bufferable;
pub(crate) use entry::BufferEntry;
pub(crate) use recency::RecencyIndex;
pub use stats::BufferStats;
pub use store::FsftBuffer;

use std::time::Duration;

// == Public Constants ==
/// Number of objects a default buffer holds
pub const DEFAULT_CAPACITY: usize = 32;

/// How long an object in a default buffer may go unaccessed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);
