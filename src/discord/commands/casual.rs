// Casual commands: small one-shot replies.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Check that the bot is alive.
#[poise::command(prefix_command, category = "Casual")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Pong! 🏓").await?;
    Ok(())
}

/// Show the most recently deleted message in this channel.
#[poise::command(prefix_command, category = "Casual", guild_only)]
pub async fn snipe(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let Some(deleted) = ctx
        .data()
        .tracker
        .last_deleted(guild_id.get(), ctx.channel_id().get())
    else {
        ctx.say("There's nothing to snipe here.").await?;
        return Ok(());
    };

    let mut embed = serenity::CreateEmbed::new()
        .author(serenity::CreateEmbedAuthor::new(
            deleted.message.author_name.clone(),
        ))
        .description(deleted.message.content.clone())
        .color(serenity::Colour::from_rgb(88, 101, 242))
        .field(
            "Deleted",
            format!("<t:{}:R>", deleted.deleted_at.timestamp()),
            true,
        );

    if !deleted.message.attachments.is_empty() {
        embed = embed.field(
            "Attachments",
            deleted.message.attachments.join("\n"),
            true,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
