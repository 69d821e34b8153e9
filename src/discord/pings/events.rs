// Discord-specific ping handling - pulls mentions out of gateway messages
// and forwards fresh pings to the log channel.

use crate::core::pings::{MentionSet, PingEvent, PingVerdict};
use crate::discord::pings::formatter;
use crate::discord::Data;
use anyhow::{Context as _, Result};
use poise::serenity_prelude::{self as serenity, Context};

/// Handle one inbound message.
///
/// Returns `true` when a log entry was sent.
pub async fn handle_message(
    ctx: &Context,
    data: &Data,
    msg: &serenity::Message,
) -> Result<bool> {
    // Only guild messages, never bots (including our own log posts).
    let guild_id = match msg.guild_id {
        Some(id) => id,
        None => return Ok(false),
    };
    if msg.author.bot {
        return Ok(false);
    }

    let now = chrono::Utc::now();
    if data.pings.already_logged(msg.id.get(), now) {
        return Ok(false);
    }

    let mentions = extract_mentions(ctx, guild_id, msg).await;
    if mentions.is_empty() {
        return Ok(false);
    }

    let event = PingEvent {
        guild_id: guild_id.get(),
        channel_id: msg.channel_id.get(),
        message_id: msg.id.get(),
        author_id: msg.author.id.get(),
        author_tag: msg.author.tag(),
        content: msg.content.clone(),
        created_at: *msg.timestamp,
        mentions,
    };

    match data.pings.observe(event.message_id, event.debounce_key(), now) {
        PingVerdict::Log => {}
        PingVerdict::AlreadyLogged | PingVerdict::Debounced => return Ok(false),
    }

    let log_channel = find_or_create_log_channel(ctx, guild_id, &data.log_channel_name).await?;

    let link = formatter::message_link(event.guild_id, event.channel_id, event.message_id);
    let components = vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new_link(link).label("Jump to message"),
    ])];

    log_channel
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new()
                .content(formatter::format_ping_log(&event))
                .components(components)
                // The log text quotes role/user names; an empty allowed-mentions
                // set makes sure posting it never re-pings anyone.
                .allowed_mentions(serenity::CreateAllowedMentions::new()),
        )
        .await
        .context("Failed to send ping log")?;

    tracing::info!(
        message_id = event.message_id,
        guild_id = event.guild_id,
        channel_id = event.channel_id,
        "Logged ping"
    );

    Ok(true)
}

/// Pull role names, user tags and the everyone flag out of a message.
///
/// Role names resolve through the cache when possible, falling back to an
/// HTTP fetch so an uncached guild still gets its roles named.
async fn extract_mentions(
    ctx: &Context,
    guild_id: serenity::GuildId,
    msg: &serenity::Message,
) -> MentionSet {
    let users: Vec<String> = msg.mentions.iter().map(|u| u.tag()).collect();

    let mut roles: Vec<String> = Vec::new();
    if !msg.mention_roles.is_empty() {
        let cached: Vec<String> = ctx
            .cache
            .guild(guild_id)
            .map(|guild| {
                msg.mention_roles
                    .iter()
                    .filter_map(|role_id| guild.roles.get(role_id).map(|r| r.name.clone()))
                    .collect()
            })
            .unwrap_or_default();

        roles = if cached.is_empty() {
            match guild_id.roles(&ctx.http).await {
                Ok(all_roles) => msg
                    .mention_roles
                    .iter()
                    .filter_map(|role_id| all_roles.get(role_id).map(|r| r.name.clone()))
                    .collect(),
                Err(e) => {
                    tracing::warn!("Failed to fetch roles for guild {}: {}", guild_id, e);
                    Vec::new()
                }
            }
        } else {
            cached
        };
    }

    MentionSet {
        everyone: msg.mention_everyone,
        roles,
        users,
    }
}

/// Look the log channel up by exact name, creating it with default settings
/// when missing. Not atomic: two overlapping events can race the create and
/// end up with twins, same as any name-based lookup against Discord.
async fn find_or_create_log_channel(
    ctx: &Context,
    guild_id: serenity::GuildId,
    name: &str,
) -> Result<serenity::ChannelId> {
    // Cache first, then HTTP, so a cold cache doesn't trigger a spurious create.
    let cached = ctx.cache.guild(guild_id).and_then(|guild| {
        guild
            .channels
            .values()
            .find(|c| c.kind == serenity::ChannelType::Text && c.name == name)
            .map(|c| c.id)
    });
    if let Some(id) = cached {
        return Ok(id);
    }

    let channels = guild_id
        .channels(&ctx.http)
        .await
        .context("Failed to list guild channels")?;
    if let Some(channel) = channels
        .values()
        .find(|c| c.kind == serenity::ChannelType::Text && c.name == name)
    {
        return Ok(channel.id);
    }

    let created = guild_id
        .create_channel(
            &ctx.http,
            serenity::CreateChannel::new(name).kind(serenity::ChannelType::Text),
        )
        .await
        .with_context(|| format!("Failed to create #{name}"))?;

    tracing::info!(guild_id = guild_id.get(), channel = name, "Created ping log channel");
    Ok(created.id)
}
