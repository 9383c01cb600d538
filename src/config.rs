//! Configuration Module
//!
//! Handles loading and validating buffer configuration from environment variables.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::buffer::{DEFAULT_CAPACITY, DEFAULT_TIMEOUT};
use crate::error::{BufferError, Result};

/// Buffer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Maximum number of objects the buffer can hold
    pub capacity: usize,
    /// How long an object may go unaccessed before it is stale
    pub timeout: Duration,
    /// Background sweep interval, None = lazy expiry only
    pub sweep_interval: Option<Duration>,
}

impl BufferConfig {
    /// Creates a new config with the given capacity and timeout and no background sweep.
    pub fn new(capacity: usize, timeout: Duration) -> Self {
        Self {
            capacity,
            timeout,
            sweep_interval: None,
        }
    }

    /// Creates a new BufferConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FSFT_CAPACITY` - Maximum buffered objects (default: 32)
    /// - `FSFT_TIMEOUT_SECS` - Timeout window in seconds (default: 180)
    /// - `FSFT_SWEEP_INTERVAL_SECS` - Background sweep frequency in seconds (default: unset)
    ///
    /// Unset or unparsable values fall back to the defaults. Range checks are
    /// left to [`BufferConfig::validate`].
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("FSFT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            timeout: env::var("FSFT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            sweep_interval: env::var("FSFT_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Sets the background sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    /// Rejects a zero capacity, timeout, or sweep interval.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            warn!("Rejected buffer configuration: capacity is zero");
            return Err(BufferError::Configuration(
                "capacity must be positive".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            warn!("Rejected buffer configuration: timeout is zero");
            return Err(BufferError::Configuration(
                "timeout must be positive".to_string(),
            ));
        }
        if self.sweep_interval.is_some_and(|interval| interval.is_zero()) {
            warn!("Rejected buffer configuration: sweep interval is zero");
            return Err(BufferError::Configuration(
                "sweep interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TIMEOUT)
    }
}
