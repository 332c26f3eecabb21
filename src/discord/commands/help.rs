// Help and command discovery, rendered from the core catalog.
//
// Every listing is filtered by a live "can the invoker run this" probe.
// The probe is pure policy evaluation, so discovery can never blow up on a
// permission question; missing context simply reads as "cannot run".

use crate::core::commands::{CategoryView, CommandCatalog, CommandEntry};
use crate::core::permissions::{format_capability, CheckOutcome, InvokerProfile};
use crate::discord::checks;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const BLURPLE: (u8, u8, u8) = (88, 101, 242);
const RED: (u8, u8, u8) = (237, 66, 69);

/// Whether this invoker could run the command right now. Fails closed.
fn can_run(ctx: &Context<'_>, invoker: &InvokerProfile, entry: &CommandEntry) -> bool {
    if entry.bot_master_only {
        return ctx.data().policy.is_bot_master(&invoker.user_id);
    }

    let required: Vec<&str> = entry
        .required_capabilities
        .iter()
        .map(|c| c.as_str())
        .collect();

    matches!(
        ctx.data().policy.check_capabilities(invoker, &required),
        CheckOutcome::Allowed
    )
}

async fn bot_face(ctx: &Context<'_>) -> Option<String> {
    ctx.framework()
        .bot_id
        .to_user(ctx)
        .await
        .ok()
        .map(|user| user.face())
}

/// Get help about anything.
///
/// `?help` shows the overview, `?help <command>` explains one command, and
/// `?help <category>` lists a whole category. `?h` works too.
#[poise::command(prefix_command, category = "Help", aliases("h"))]
pub async fn help(
    ctx: Context<'_>,
    #[rest]
    #[description = "Command or category to look up"]
    query: Option<String>,
) -> Result<(), Error> {
    let Some(query) = query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return show_general_help(ctx).await;
    };

    let catalog = &ctx.data().catalog;
    let invoker = checks::invoker_profile(&ctx).await;

    if let Some(entry) = catalog.find(query) {
        return show_command_help(&ctx, &invoker, entry).await;
    }

    if let Some(category) = catalog.category_matching(query) {
        let view = catalog.category_view(category, |entry| can_run(&ctx, &invoker, entry));
        return show_category_help(&ctx, view).await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("Not Found")
        .description(format!(
            "I couldn't find a command or category called `{}`.",
            query
        ))
        .color(serenity::Colour::from_rgb(RED.0, RED.1, RED.2))
        .field(
            "Tip",
            format!(
                "Try `{}commands` to see all available commands!",
                ctx.prefix()
            ),
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

async fn show_command_help(
    ctx: &Context<'_>,
    invoker: &InvokerProfile,
    entry: &CommandEntry,
) -> Result<(), Error> {
    let runnable = can_run(ctx, invoker, entry);

    let mut embed = serenity::CreateEmbed::new()
        .author(serenity::CreateEmbedAuthor::new("Command Help"))
        .title(entry.name.clone())
        .description(entry.help.clone())
        .color(serenity::Colour::from_rgb(BLURPLE.0, BLURPLE.1, BLURPLE.2))
        .field(
            "Usage",
            format!("```\n{}{}\n```", ctx.prefix(), entry.signature),
            false,
        );

    if let Some(face) = bot_face(ctx).await {
        embed = embed.thumbnail(face);
    }

    if !entry.aliases.is_empty() {
        let aliases = entry
            .aliases
            .iter()
            .map(|a| format!("`{}`", a))
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field("Aliases", aliases, true);
    }

    if entry.bot_master_only {
        embed = embed.field("Permissions", "Bot developers", true);
    } else if !entry.required_capabilities.is_empty() {
        let perms = entry
            .required_capabilities
            .iter()
            .map(|c| format_capability(c))
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field("Permissions", perms, true);
    }

    let footer = if runnable {
        "You can use this"
    } else {
        "You can't use this (missing permissions)"
    };
    embed = embed.footer(serenity::CreateEmbedFooter::new(footer));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

async fn show_category_help(ctx: &Context<'_>, view: CategoryView<'_>) -> Result<(), Error> {
    if view.visible.is_empty() && view.hidden == 0 {
        ctx.say(format!("No commands found in the {} category.", view.name))
            .await?;
        return Ok(());
    }

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} Commands", view.name))
        .color(serenity::Colour::from_rgb(BLURPLE.0, BLURPLE.1, BLURPLE.2));

    if let Some(face) = bot_face(ctx).await {
        embed = embed.thumbnail(face);
    }

    for entry in &view.visible {
        let aliases = if entry.aliases.is_empty() {
            String::new()
        } else {
            format!(" `[{}]`", entry.aliases.join(", "))
        };
        embed = embed.field(
            format!("→ {}{}{}", ctx.prefix(), entry.signature, aliases),
            entry.summary().to_string(),
            false,
        );
    }

    let footer = if view.hidden > 0 {
        format!("{} command(s) hidden (no permission)", view.hidden)
    } else {
        format!(
            "Need help with a command? Use {}help <command>",
            ctx.prefix()
        )
    };
    embed = embed.footer(serenity::CreateEmbedFooter::new(footer));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

async fn show_general_help(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = ctx.prefix().to_string();

    let mut embed = serenity::CreateEmbed::new()
        .title("About Cro")
        .description("Cro is a multipurpose bot for your server.")
        .color(serenity::Colour::from_rgb(BLURPLE.0, BLURPLE.1, BLURPLE.2))
        .field(
            "Getting Help",
            format!(
                "`{prefix}help <command>` — Learn about a specific command\n\
                 `{prefix}help <category>` — See all commands in a category\n\
                 `{prefix}commands` — Browse everything organized by category"
            ),
            false,
        );

    if let Some(face) = bot_face(&ctx).await {
        embed = embed.thumbnail(face);
    }

    let invoker = checks::invoker_profile(&ctx).await;
    let categories: Vec<&str> = ctx
        .data()
        .catalog
        .overview(|entry| can_run(&ctx, &invoker, entry))
        .iter()
        .map(|view| view.name)
        .collect();

    if !categories.is_empty() {
        let listed = categories
            .iter()
            .map(|c| format!("**{}**", c))
            .collect::<Vec<_>>()
            .join(" • ");
        embed = embed.field("What I Can Do", listed, false);
    }

    embed = embed.field(
        "Pro Tips",
        format!(
            "Alias for help: `{prefix}h`\n\
             Change prefix: `{prefix}config prefix <new>`\n\
             Mention me and I'll say hi"
        ),
        false,
    );

    embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
        "Use {prefix}help <command> for details on any command."
    )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// See all available commands organized by category.
///
/// This is the whole command catalog. Use `?help <command>` for details on
/// anything listed here.
#[poise::command(prefix_command, category = "Help", aliases("cmds", "cmd"))]
pub async fn commands(ctx: Context<'_>) -> Result<(), Error> {
    let invoker = checks::invoker_profile(&ctx).await;
    let catalog: &CommandCatalog = &ctx.data().catalog;
    let overview = catalog.overview(|entry| can_run(&ctx, &invoker, entry));

    if overview.is_empty() {
        ctx.say("No commands available for you.").await?;
        return Ok(());
    }

    let prefix = ctx.prefix().to_string();
    let mut embed = serenity::CreateEmbed::new()
        .title("All Available Commands")
        .description(format!(
            "**Quick help:** Use `{prefix}help <command>` for details\n\
             **Explore:** Use `{prefix}help <category>` to see a category"
        ))
        .color(serenity::Colour::from_rgb(BLURPLE.0, BLURPLE.1, BLURPLE.2));

    for view in &overview {
        let names = view
            .visible
            .iter()
            .map(|entry| format!("`{}`", entry.name))
            .collect::<Vec<_>>()
            .join(", ");

        let title = if view.hidden > 0 {
            format!("{} ({} more hidden)", view.name, view.hidden)
        } else {
            view.name.to_string()
        };

        embed = embed.field(title, names, false);
    }

    embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
        "{prefix}help is your friend"
    )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
