// Event handler for non-command Discord events: mention replies, guild-name
// bookkeeping, and deleted-message tracking. Command dispatch itself is the
// framework's job; everything that falls through lands here.

use crate::core::tracking::TrackedMessage;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            // Ignore bot messages (including our own)
            if new_message.author.bot {
                return Ok(());
            }

            if let Some(guild_id) = new_message.guild_id {
                // Keep the stored guild name current so settings dumps stay
                // readable. Write only on change; every write rewrites the
                // whole settings document.
                let guild_name = new_message.guild(&ctx.cache).map(|g| g.name.clone());
                if let Some(name) = guild_name {
                    let stored = data
                        .settings
                        .get(guild_id.get(), "server_name")
                        .await
                        .and_then(|v| v.as_str().map(String::from));
                    if stored.as_deref() != Some(name.as_str()) {
                        data.settings
                            .set(guild_id.get(), "server_name", name)
                            .await;
                    }
                }

                // Remember the message so a later deletion can be sniped.
                data.tracker.remember(TrackedMessage {
                    message_id: new_message.id.get(),
                    guild_id: guild_id.get(),
                    channel_id: new_message.channel_id.get(),
                    author_id: new_message.author.id.get(),
                    author_name: new_message.author.name.clone(),
                    content: new_message.content.clone(),
                    attachments: new_message
                        .attachments
                        .iter()
                        .map(|a| a.filename.clone())
                        .collect(),
                });
            }

            // Bare mentions (not replies, not mass pings) get a greeting.
            let bot_id = ctx.cache.current_user().id;
            let is_mention = new_message.mentions.iter().any(|u| u.id == bot_id);
            let is_mass_ping = new_message.content.contains("@everyone")
                || new_message.content.contains("@here");
            let is_reply = new_message.referenced_message.is_some()
                || new_message.kind == serenity::MessageType::InlineReply;

            if is_mention && !is_mass_ping && !is_reply {
                let reply = data.strings.random_ping_reply();
                if let Err(err) = new_message.channel_id.say(&ctx.http, reply).await {
                    tracing::warn!("failed to send ping reply: {}", err);
                }
            }
        }
        serenity::FullEvent::MessageDelete {
            deleted_message_id, ..
        } => {
            data.tracker.record_deletion(deleted_message_id.get());
        }
        _ => {}
    }

    Ok(())
}

/// Central error hook: a failing handler is logged and answered with a short
/// apology, and must never take the event loop down with it.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {:?}", error)
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(
                command = %ctx.command().qualified_name,
                "command failed: {}",
                error
            );
            let _ = ctx.say("Something went wrong running that command.").await;
        }
        // The check already told the user why; nothing more to say.
        poise::FrameworkError::CommandCheckFailed { .. } => {}
        other => {
            if let Err(err) = poise::builtins::on_error(other).await {
                tracing::error!("error while handling error: {}", err);
            }
        }
    }
}
