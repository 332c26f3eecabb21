// Admin commands: per-guild configuration and bot-master utilities.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const MAX_PREFIX_LEN: usize = 10;

/// Configure this server's settings.
///
/// Subcommands: show, prefix, usedefaults, unset, reset.
/// For example `?config prefix !!` gives the server its own prefix.
#[poise::command(
    prefix_command,
    category = "Admin",
    guild_only,
    aliases("settings"),
    check = "crate::discord::checks::manage_guild",
    subcommands("show", "prefix", "usedefaults", "unset", "reset")
)]
pub async fn config(ctx: Context<'_>) -> Result<(), Error> {
    // Bare `?config` behaves like `?config show`.
    show_settings(ctx).await
}

/// Show the server's current settings, defaults included.
#[poise::command(prefix_command, guild_only, check = "crate::discord::checks::manage_guild")]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    show_settings(ctx).await
}

async fn show_settings(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let mut settings: Vec<(String, String)> = ctx
        .data()
        .settings
        .get_all(guild_id.get())
        .await
        .into_iter()
        .map(|(key, value)| (key, value.to_string()))
        .collect();
    settings.sort_by(|a, b| a.0.cmp(&b.0));

    let listing = settings
        .iter()
        .map(|(key, value)| format!("`{}`: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title("Server Settings")
        .description(listing)
        .color(serenity::Colour::from_rgb(88, 101, 242))
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Change one with {}config <setting> <value>",
            ctx.prefix()
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Set or show the server's custom prefix.
#[poise::command(prefix_command, guild_only, check = "crate::discord::checks::manage_guild")]
pub async fn prefix(
    ctx: Context<'_>,
    #[description = "New prefix (omit to show the current one)"] new_prefix: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let Some(new_prefix) = new_prefix else {
        let current = ctx.data().settings.custom_prefix(guild_id.get()).await;
        match current {
            Some(prefix) => ctx.say(format!("Current custom prefix: `{}`", prefix)).await?,
            None => {
                ctx.say("No custom prefix set; the default prefixes apply.")
                    .await?
            }
        };
        return Ok(());
    };

    if new_prefix.is_empty() || new_prefix.len() > MAX_PREFIX_LEN {
        ctx.say(format!(
            "Prefixes must be between 1 and {} characters.",
            MAX_PREFIX_LEN
        ))
        .await?;
        return Ok(());
    }
    if new_prefix.chars().any(char::is_whitespace) {
        ctx.say("Prefixes can't contain whitespace.").await?;
        return Ok(());
    }

    ctx.data()
        .settings
        .set(guild_id.get(), "prefix", new_prefix.as_str())
        .await;

    ctx.say(format!("Custom prefix set to `{}`.", new_prefix))
        .await?;
    Ok(())
}

/// Turn the built-in default prefixes on or off for this server.
#[poise::command(prefix_command, guild_only, check = "crate::discord::checks::manage_guild")]
pub async fn usedefaults(
    ctx: Context<'_>,
    #[description = "true to accept the default prefixes"] enabled: bool,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    ctx.data()
        .settings
        .set(guild_id.get(), "use_default_prefix", enabled)
        .await;

    let note = if enabled {
        "Default prefixes are enabled."
    } else {
        // The router falls back to the defaults when no custom prefix exists,
        // so warn rather than letting the guild think it locked itself out.
        if ctx.data().settings.custom_prefix(guild_id.get()).await.is_none() {
            "Default prefixes are disabled, but since no custom prefix is set they still apply."
        } else {
            "Default prefixes are disabled; only the custom prefix works now."
        }
    };

    ctx.say(note).await?;
    Ok(())
}

/// Remove a single setting, restoring its default.
#[poise::command(prefix_command, guild_only, check = "crate::discord::checks::manage_guild")]
pub async fn unset(
    ctx: Context<'_>,
    #[description = "Setting name to remove"] key: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    ctx.data().settings.remove(guild_id.get(), &key).await;
    ctx.say(format!("Removed `{}` for this server.", key)).await?;
    Ok(())
}

/// Clear every setting for this server.
#[poise::command(prefix_command, guild_only, check = "crate::discord::checks::manage_guild")]
pub async fn reset(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    ctx.data().settings.clear(guild_id.get()).await;
    ctx.say("All settings for this server have been cleared.")
        .await?;
    Ok(())
}

/// Override the bot's status text until the next rotation.
#[poise::command(
    prefix_command,
    category = "Admin",
    hide_in_help,
    check = "crate::discord::checks::bot_master"
)]
pub async fn setstatus(
    ctx: Context<'_>,
    #[rest]
    #[description = "Status text to display"]
    text: String,
) -> Result<(), Error> {
    ctx.serenity_context().set_presence(
        Some(serenity::ActivityData::custom(text.clone())),
        serenity::OnlineStatus::Idle,
    );

    ctx.say(format!("Status set to \"{}\".", text)).await?;
    Ok(())
}
