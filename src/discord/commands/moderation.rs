// Moderation commands. Thin wrappers over the SDK's moderation endpoints;
// the permission gate has already run by the time a body executes.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const MAX_PURGE: usize = 100;
// Discord's slowmode ceiling, in seconds.
const MAX_SLOWMODE_SECS: u16 = 21_600;

/// Delete the last few messages in this channel.
#[poise::command(
    prefix_command,
    category = "Moderation",
    guild_only,
    aliases("clear"),
    check = "crate::discord::checks::manage_messages"
)]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "How many messages to delete (1-100)"] count: usize,
) -> Result<(), Error> {
    if count == 0 || count > MAX_PURGE {
        ctx.say(format!("I can delete between 1 and {} messages.", MAX_PURGE))
            .await?;
        return Ok(());
    }

    // Fetch one extra so the invoking message goes too.
    let fetch = ((count + 1).min(MAX_PURGE)) as u8;
    let messages = ctx
        .channel_id()
        .messages(&ctx.http(), serenity::GetMessages::new().limit(fetch))
        .await?;

    let ids: Vec<serenity::MessageId> = messages.iter().map(|m| m.id).collect();
    let deleted = ids.len().saturating_sub(1);
    ctx.channel_id().delete_messages(&ctx.http(), ids).await?;

    ctx.say(format!("Deleted {} message(s).", deleted)).await?;
    Ok(())
}

/// Set this channel's slowmode delay. 0 turns slowmode off.
#[poise::command(
    prefix_command,
    category = "Moderation",
    guild_only,
    check = "crate::discord::checks::manage_channels"
)]
pub async fn slowmode(
    ctx: Context<'_>,
    #[description = "Delay between messages, in seconds"] seconds: u16,
) -> Result<(), Error> {
    if seconds > MAX_SLOWMODE_SECS {
        ctx.say(format!(
            "Slowmode can be at most {} seconds.",
            MAX_SLOWMODE_SECS
        ))
        .await?;
        return Ok(());
    }

    ctx.channel_id()
        .edit(
            ctx.serenity_context(),
            serenity::EditChannel::new().rate_limit_per_user(seconds),
        )
        .await?;

    if seconds == 0 {
        ctx.say("Slowmode disabled.").await?;
    } else {
        ctx.say(format!("Slowmode set to {} second(s).", seconds))
            .await?;
    }
    Ok(())
}

/// Kick a member from the server.
#[poise::command(
    prefix_command,
    category = "Moderation",
    guild_only,
    check = "crate::discord::checks::kick_members"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Member to kick"] user: serenity::User,
    #[rest]
    #[description = "Reason for the kick"]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    if user.id == ctx.author().id {
        ctx.say("You can't kick yourself.").await?;
        return Ok(());
    }

    match reason.as_deref() {
        Some(reason) => {
            guild_id
                .kick_with_reason(&ctx.http(), user.id, reason)
                .await?
        }
        None => guild_id.kick(&ctx.http(), user.id).await?,
    }

    ctx.say(format!("Kicked **{}**.", user.name)).await?;
    Ok(())
}
