// Renders a ping event into the markdown block posted to the log channel.

use crate::core::pings::PingEvent;

/// Escape characters that would break markdown link text. Asterisks are left
/// alone on purpose: every log line is wrapped in bold markers anyway, and
/// Discord renders stray `\*` escapes literally inside link text.
pub fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '|' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Direct URL addressing one message within a guild channel.
pub fn message_link(guild_id: u64, channel_id: u64, message_id: u64) -> String {
    format!("https://discord.com/channels/{guild_id}/{channel_id}/{message_id}")
}

/// Absolute + relative Discord timestamp pair, e.g. `<t:123:F> (<t:123:R>)`.
fn format_time(unix: i64) -> String {
    format!("<t:{unix}:F> (<t:{unix}:R>)")
}

/// Markdown link whose visible text is the mentioned name and whose target
/// jumps to the originating message.
fn mention_link(name: &str, link: &str) -> String {
    format!("[{}]({})", escape_link_text(name), link)
}

/// Build the full log message body for one ping.
pub fn format_ping_log(event: &PingEvent) -> String {
    let link = message_link(event.guild_id, event.channel_id, event.message_id);

    // @everyone/@here first, then role links, then user links.
    let mut mentions = Vec::new();
    if event.mentions.everyone {
        mentions.push("@everyone/@here".to_string());
    }
    for role in &event.mentions.roles {
        mentions.push(mention_link(&format!("@{role}"), &link));
    }
    for user in &event.mentions.users {
        mentions.push(mention_link(user, &link));
    }

    // Each line carries its own bold markers so the whole block renders bold.
    format!(
        "**New Ping detected!**\n\
         **Role: {}**\n\
         **From: {}**\n\
         **Where: <#{}>**\n\
         **Time: {}**",
        mentions.join(", "),
        mention_link(&event.author_tag, &link),
        event.channel_id,
        format_time(event.created_at.timestamp()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pings::MentionSet;
    use chrono::{TimeZone, Utc};

    fn sample_event(mentions: MentionSet) -> PingEvent {
        PingEvent {
            guild_id: 100,
            channel_id: 200,
            message_id: 300,
            author_id: 400,
            author_tag: "alice#1234".to_string(),
            content: "hello @role1 @everyone".to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            mentions,
        }
    }

    #[test]
    fn escapes_pipes_backticks_and_backslashes() {
        assert_eq!(escape_link_text("a|b"), "a\\|b");
        assert_eq!(escape_link_text("a`b"), "a\\`b");
        assert_eq!(escape_link_text("a\\b"), "a\\\\b");
    }

    #[test]
    fn leaves_asterisks_unescaped() {
        assert_eq!(escape_link_text("**mods**"), "**mods**");
    }

    #[test]
    fn builds_message_link() {
        assert_eq!(
            message_link(1, 2, 3),
            "https://discord.com/channels/1/2/3"
        );
    }

    #[test]
    fn everyone_comes_before_role_links() {
        let event = sample_event(MentionSet {
            everyone: true,
            roles: vec!["role1".to_string()],
            users: vec![],
        });

        let log = format_ping_log(&event);
        assert!(log.contains(
            "Role: @everyone/@here, [@role1](https://discord.com/channels/100/200/300)"
        ));
    }

    #[test]
    fn log_block_lists_author_channel_and_time() {
        let event = sample_event(MentionSet {
            everyone: false,
            roles: vec![],
            users: vec!["bob#5678".to_string()],
        });

        let log = format_ping_log(&event);
        assert!(log.starts_with("**New Ping detected!**\n"));
        assert!(log.contains("**From: [alice#1234](https://discord.com/channels/100/200/300)**"));
        assert!(log.contains("**Where: <#200>**"));
        assert!(log.contains("**Time: <t:1700000000:F> (<t:1700000000:R>)**"));
        assert!(log.contains("[bob#5678](https://discord.com/channels/100/200/300)"));
    }

    #[test]
    fn role_names_with_link_breakers_are_escaped() {
        let event = sample_event(MentionSet {
            everyone: false,
            roles: vec!["mods|admins".to_string(), "back`tick".to_string()],
            users: vec![],
        });

        let log = format_ping_log(&event);
        assert!(log.contains("[@mods\\|admins]"));
        assert!(log.contains("[@back\\`tick]"));
    }
}
