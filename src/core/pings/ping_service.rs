// Ping tracking - core business logic for deciding which pings get logged.
//
// Two in-memory tables guard against double logging:
// - a marker set of message IDs that already produced a log entry
// - a debounce registry keyed by (author, channel, exact text)
//
// NO Discord dependencies here - just pure domain logic.

use super::ping_models::PingKey;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// How long an identical (author, channel, text) triple is suppressed.
const DEBOUNCE_MS: i64 = 1_200;

/// Outcome of checking one ping against the dedup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingVerdict {
    /// First time we see this ping - log it.
    Log,
    /// This exact message ID already produced a log entry.
    AlreadyLogged,
    /// Identical ping from the same author/channel inside the debounce window.
    Debounced,
}

/// Process-scoped dedup state, owned by the logger and mutated only through
/// the methods below. Entries self-expire: markers die at twice the debounce
/// window, debounce entries once they go untouched for that long.
pub struct PingTracker {
    // Message ID -> when the marker expires
    logged_messages: DashMap<u64, DateTime<Utc>>,
    // Debounce key -> last time that exact ping was logged
    recent_pings: DashMap<PingKey, DateTime<Utc>>,
}

impl PingTracker {
    pub fn new() -> Self {
        Self {
            logged_messages: DashMap::new(),
            recent_pings: DashMap::new(),
        }
    }

    fn debounce_window() -> Duration {
        Duration::milliseconds(DEBOUNCE_MS)
    }

    /// How long entries are kept before expiring.
    fn retention() -> Duration {
        Duration::milliseconds(DEBOUNCE_MS * 2)
    }

    /// Marker lookup with lazy expiry: an entry past its deadline is removed
    /// and treated as absent.
    pub fn already_logged(&self, message_id: u64, now: DateTime<Utc>) -> bool {
        self.logged_messages
            .remove_if(&message_id, |_, expires| *expires <= now);
        self.logged_messages.contains_key(&message_id)
    }

    /// Run the full dedup decision for one message, recording it when it
    /// passes. A suppressed ping leaves both tables untouched.
    pub fn observe(&self, message_id: u64, key: PingKey, now: DateTime<Utc>) -> PingVerdict {
        if self.already_logged(message_id, now) {
            return PingVerdict::AlreadyLogged;
        }

        if let Some(last) = self.recent_pings.get(&key) {
            if now - *last < Self::debounce_window() {
                return PingVerdict::Debounced;
            }
        }

        self.recent_pings.insert(key, now);
        self.logged_messages
            .insert(message_id, now + Self::retention());
        PingVerdict::Log
    }

    /// Drop entries whose retention window has passed. Debounce entries only
    /// go once untouched for the full window, so a key that pinged again in
    /// the meantime keeps its newer timestamp.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let before = self.logged_messages.len() + self.recent_pings.len();
        self.logged_messages.retain(|_, expires| *expires > now);
        self.recent_pings
            .retain(|_, last| now - *last < Self::retention());
        before - (self.logged_messages.len() + self.recent_pings.len())
    }
}

impl Default for PingTracker {
    fn default() -> Self {
        Self::new()
    }
}
