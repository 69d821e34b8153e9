use chrono::{DateTime, Utc};

/// Snapshot of a guild message that pinged somebody, extracted from the
/// gateway event up front so the rest of the pipeline stays Discord-free.
#[derive(Debug, Clone)]
pub struct PingEvent {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub author_tag: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub mentions: MentionSet,
}

/// The mentions carried by a single message.
#[derive(Debug, Clone, Default)]
pub struct MentionSet {
    /// True when the message pinged @everyone or @here.
    pub everyone: bool,
    /// Names of the roles that were pinged.
    pub roles: Vec<String>,
    /// Tags of the users that were pinged.
    pub users: Vec<String>,
}

impl MentionSet {
    pub fn is_empty(&self) -> bool {
        !self.everyone && self.roles.is_empty() && self.users.is_empty()
    }
}

/// Debounce key: the same author posting the same text in the same channel
/// counts as one ping while the window is open. The exact message text is
/// part of the key on purpose - two genuinely different alerts in the same
/// second must both get logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PingKey {
    pub author_id: u64,
    pub channel_id: u64,
    pub content: String,
}

impl PingEvent {
    pub fn debounce_key(&self) -> PingKey {
        PingKey {
            author_id: self.author_id,
            channel_id: self.channel_id,
            content: self.content.clone(),
        }
    }
}
