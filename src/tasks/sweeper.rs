//! Freshness Sweep Task
//!
//! Background task that periodically removes expired buffer entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::buffer::{Bufferable, FsftBuffer};
use crate::config::BufferConfig;

/// Spawns a background task that periodically sweeps expired entries.
///
/// Without it, expired entries are only dropped when an operation addresses
/// them or a `put` runs. The sweep takes the buffer's own lock for one pass
/// over the entries, exactly as `put` does, so it introduces no new locking.
///
/// Must be called from within a Tokio runtime. The returned handle can be
/// used to abort the task.
///
/// # Example
/// ```ignore
/// let buffer = Arc::new(FsftBuffer::<String>::default());
/// let sweeper = spawn_sweeper(buffer.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper<B>(buffer: Arc<FsftBuffer<B>>, interval: Duration) -> JoinHandle<()>
where
    B: Bufferable + Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting freshness sweep task with interval of {:?}",
            interval
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = buffer.sweep_expired();

            if removed > 0 {
                info!("Freshness sweep: removed {} expired entries", removed);
            } else {
                debug!("Freshness sweep: no expired entries found");
            }
        }
    })
}

/// Starts the sweep configured by `config.sweep_interval`.
///
/// Returns None when no interval is configured, leaving the buffer on lazy
/// expiry alone. Must be called from within a Tokio runtime.
pub fn spawn_configured_sweeper<B>(
    buffer: Arc<FsftBuffer<B>>,
    config: &BufferConfig,
) -> Option<JoinHandle<()>>
where
    B: Bufferable + Clone + Send + 'static,
{
    match config.sweep_interval {
        Some(interval) => Some(spawn_sweeper(buffer, interval)),
        None => {
            debug!("No sweep interval configured, relying on lazy expiry");
            None
        }
    }
}
