//! Error types for the buffer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Buffer Error Enum ==
/// Unified error type for buffer construction and lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Malformed input from the caller, e.g. an absent id
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Id was never stored, or was evicted or removed
    #[error("Id not found: {0}")]
    NotFound(String),

    /// Id was stored but its timeout window has elapsed
    #[error("Id expired: {0}")]
    Expired(String),

    /// Non-positive capacity or timeout
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl BufferError {
    /// Returns true for outcomes a caller should treat as a cache miss.
    pub fn is_miss(&self) -> bool {
        matches!(self, BufferError::NotFound(_) | BufferError::Expired(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the buffer.
pub type Result<T> = std::result::Result<T, BufferError>;
