// Permission middleware glue. Each command declares one of the check
// functions below; the check builds an invoker profile from Discord state,
// asks the core policy for a verdict, and on denial sends the uniform
// denial line and stops the invocation before the handler body runs.

use crate::core::permissions::{CheckOutcome, InvokerProfile};
use crate::discord::{Context, Error};
use poise::serenity_prelude::Permissions;
use std::collections::HashSet;

/// Capability names the gate understands, with their Discord permission bit.
/// Capability checks are declared against the snake_case names so the core
/// stays free of SDK types.
const KNOWN_CAPABILITIES: &[(&str, Permissions)] = &[
    ("administrator", Permissions::ADMINISTRATOR),
    ("manage_guild", Permissions::MANAGE_GUILD),
    ("manage_messages", Permissions::MANAGE_MESSAGES),
    ("manage_channels", Permissions::MANAGE_CHANNELS),
    ("kick_members", Permissions::KICK_MEMBERS),
    ("ban_members", Permissions::BAN_MEMBERS),
    ("moderate_members", Permissions::MODERATE_MEMBERS),
];

/// Capabilities each command requires, used both by the gate and by help
/// rendering. Commands not listed here require nothing.
pub fn required_capabilities(command: &str) -> &'static [&'static str] {
    match command {
        "config" => &["manage_guild"],
        "purge" => &["manage_messages"],
        "slowmode" => &["manage_channels"],
        "kick" => &["kick_members"],
        _ => &[],
    }
}

/// Commands reserved for configured bot masters.
pub fn is_bot_master_command(command: &str) -> bool {
    matches!(command, "setstatus")
}

fn capability_names(perms: Permissions) -> HashSet<String> {
    if perms.administrator() {
        // Administrators effectively hold everything we know about.
        return KNOWN_CAPABILITIES
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
    }

    KNOWN_CAPABILITIES
        .iter()
        .filter(|(_, bit)| perms.contains(*bit))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Assemble what the core policy needs to know about the invoking user.
/// Anything we cannot determine (uncached guild, missing member) is left
/// empty so the check fails closed instead of erroring.
pub async fn invoker_profile(ctx: &Context<'_>) -> InvokerProfile {
    let user_id = ctx.author().id.to_string();

    if ctx.guild_id().is_none() {
        return InvokerProfile::direct_message(user_id);
    }

    // Fetch the member first; the cached guild ref below must not be held
    // across an await point.
    let member = ctx.author_member().await;

    let (is_guild_owner, capabilities) = match ctx.guild() {
        Some(guild) => {
            let is_owner = guild.owner_id == ctx.author().id;
            let capabilities = member
                .as_deref()
                .map(|m| capability_names(guild.member_permissions(m)))
                .unwrap_or_default();
            (is_owner, capabilities)
        }
        // Guild not cached; leave the capability set empty and fail closed.
        None => (false, HashSet::new()),
    };

    InvokerProfile {
        user_id,
        in_guild: true,
        is_guild_owner,
        capabilities,
    }
}

async fn gate(ctx: Context<'_>, required: &[&str]) -> Result<bool, Error> {
    let invoker = invoker_profile(&ctx).await;

    match ctx.data().policy.check_capabilities(&invoker, required) {
        CheckOutcome::Allowed => Ok(true),
        CheckOutcome::Denied(denial) => {
            tracing::warn!(
                user = %invoker.user_id,
                command = %ctx.command().qualified_name,
                "permission denied: {:?}",
                denial
            );
            ctx.say(denial.message()).await?;
            Ok(false)
        }
    }
}

pub async fn manage_guild(ctx: Context<'_>) -> Result<bool, Error> {
    gate(ctx, required_capabilities("config")).await
}

pub async fn manage_messages(ctx: Context<'_>) -> Result<bool, Error> {
    gate(ctx, required_capabilities("purge")).await
}

pub async fn manage_channels(ctx: Context<'_>) -> Result<bool, Error> {
    gate(ctx, required_capabilities("slowmode")).await
}

pub async fn kick_members(ctx: Context<'_>) -> Result<bool, Error> {
    gate(ctx, required_capabilities("kick")).await
}

pub async fn bot_master(ctx: Context<'_>) -> Result<bool, Error> {
    let invoker = invoker_profile(&ctx).await;

    match ctx.data().policy.check_bot_master(&invoker) {
        CheckOutcome::Allowed => Ok(true),
        CheckOutcome::Denied(denial) => {
            tracing::warn!(
                user = %invoker.user_id,
                command = %ctx.command().qualified_name,
                "bot-master check failed"
            );
            ctx.say(denial.message()).await?;
            Ok(false)
        }
    }
}
