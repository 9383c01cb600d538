//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a buffer.
//!
//! # Tasks
//! - Freshness sweep: removes expired buffer entries at a fixed interval

mod sweeper;

pub use sweeper::{spawn_configured_sweeper, spawn_sweeper};
