// Core ping module - mention dedup/debounce business logic.

pub mod ping_models;
pub mod ping_service;

pub use ping_models::{MentionSet, PingEvent, PingKey};
pub use ping_service::{PingTracker, PingVerdict};
