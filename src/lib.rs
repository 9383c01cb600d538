//! FSFT Buffer - A fixed-size, fixed-timeout object buffer
//!
//! Holds up to a fixed number of identifiable objects, evicts the least
//! recently used one when full, and treats any object that has not been
//! accessed within a timeout window as absent.
//!
//! ```
//! use std::time::Duration;
//! use fsft_buffer::{BufferError, FsftBuffer};
//!
//! let buffer: FsftBuffer<String> = FsftBuffer::new(2, Duration::from_secs(60))?;
//!
//! assert!(buffer.put("a".to_string()));
//! assert!(buffer.put("b".to_string()));
//! buffer.get("a")?;
//! assert!(buffer.put("c".to_string())); // evicts "b"
//!
//! assert!(matches!(buffer.get("b"), Err(BufferError::NotFound(_))));
//! assert!(buffer.touch("a")?);
//! # Ok::<(), BufferError>(())
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod tasks;

pub use buffer::{Bufferable, BufferStats, FsftBuffer, DEFAULT_CAPACITY, DEFAULT_TIMEOUT};
pub use config::BufferConfig;
pub use error::{BufferError, Result};
pub use tasks::{spawn_configured_sweeper, spawn_sweeper};
