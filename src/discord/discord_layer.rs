// Discord layer - event handlers and message formatting.

#[path = "pings/mod.rs"]
pub mod pings;

use crate::core::pings::PingTracker;
use std::sync::Arc;

/// Error type bubbled out of the poise event handler.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Data that's shared across all event handlers.
pub struct Data {
    pub pings: Arc<PingTracker>,
    /// Name of the channel ping logs are written to.
    pub log_channel_name: String,
}
