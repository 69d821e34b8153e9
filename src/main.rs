// This is the entry point of the ping logger bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `discord/` = Discord-specific adapters (events, formatting)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize the ping tracker
// 3. Set up the Discord framework
// 4. Wire up the message event handler

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;

use crate::core::pings::PingTracker;
use crate::discord::pings::events as ping_events;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

const DEFAULT_LOG_CHANNEL: &str = "ping-logs";

/// Event handler for non-command Discord events.
/// The only event we care about is message creation.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        // A failed lookup/send only loses this one log entry, never the process.
        if let Err(e) = ping_events::handle_message(ctx, data, new_message).await {
            tracing::error!("Error handling ping for message {}: {}", new_message.id, e);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // A missing token is not fatal here: the gateway connection simply fails
    // and serenity reports it. We just surface whether one was present.
    let token = std::env::var("DISCORD_TOKEN").ok();
    tracing::info!(token_present = token.is_some(), "Ping logger starting up");

    let log_channel_name =
        std::env::var("PING_LOG_CHANNEL").unwrap_or_else(|_| DEFAULT_LOG_CHANNEL.to_string());

    let pings = Arc::new(PingTracker::new());

    let data = Data {
        pings: Arc::clone(&pings),
        log_channel_name,
    };

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT; // Required to read message content

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // No slash commands - this bot only listens to messages.
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|_ctx, ready, _framework| {
            Box::pin(async move {
                println!("🤖 Logged in as {}", ready.user.name);
                println!("🚀 Ping logger is ready!");

                // Background sweep so expired dedup entries don't pile up
                // between pings. Lookups already lazy-expire; this is hygiene.
                let tracker = Arc::clone(&pings);
                tokio::spawn(async move {
                    use std::time::Duration as StdDuration;
                    use tokio::time::sleep;

                    loop {
                        sleep(StdDuration::from_secs(30)).await;
                        let removed = tracker.sweep(chrono::Utc::now());
                        if removed > 0 {
                            tracing::debug!("Swept {} expired ping entries", removed);
                        }
                    }
                });

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token.unwrap_or_default(), intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    if let Err(e) = client.start().await {
        tracing::error!("Client error: {}", e);
    }
}
