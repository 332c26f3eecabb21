// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (settings backings)
// - `discord/` = Discord-specific adapters (commands, checks, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::config::BotConfig;
use crate::core::permissions::PermissionPolicy;
use crate::core::settings::{default_settings, SettingsService};
use crate::core::strings::StringPool;
use crate::core::tracking::MessageTracker;
use crate::discord::{commands, events, prefix, presence, registry, Data};
use crate::infra::settings::JsonSettingsStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = Arc::new(BotConfig::from_env().expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    ));

    // Keep runtime files in a dedicated folder so the repo root stays tidy.
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let settings_store = JsonSettingsStore::new(config.settings_path.clone());
    let settings = Arc::new(SettingsService::new(settings_store, default_settings()));

    let policy = Arc::new(PermissionPolicy::new(config.bot_masters.iter().cloned()));
    let strings = Arc::new(StringPool::load(&config.strings_path));
    let tracker = Arc::new(MessageTracker::new());

    // Register all our commands here
    let command_list = vec![
        commands::help::help(),
        commands::help::commands(),
        commands::admin::config(),
        commands::admin::setstatus(),
        commands::moderation::purge(),
        commands::moderation::slowmode(),
        commands::moderation::kick(),
        commands::casual::ping(),
        commands::casual::snipe(),
        commands::fun::roll(),
        commands::fun::coinflip(),
    ];

    // The help catalog mirrors the registered commands; building it up front
    // also rejects duplicate names/aliases before we ever connect.
    let catalog = Arc::new(
        registry::build_catalog(&command_list).expect("Command registry has duplicate names"),
    );

    let data = Data {
        config: Arc::clone(&config),
        settings: Arc::clone(&settings),
        policy: Arc::clone(&policy),
        catalog: Arc::clone(&catalog),
        strings: Arc::clone(&strings),
        tracker: Arc::clone(&tracker),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // Configure the poise framework with our commands and settings.

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: command_list,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None,
                // Per-guild prefixes come out of the settings store, so the
                // whole prefix decision lives in this hook.
                stripped_dynamic_prefix: Some(|ctx, msg, data| {
                    Box::pin(prefix::stripped_dynamic_prefix(ctx, msg, data))
                }),
                // Bare mentions are greetings, handled in the event layer.
                mention_as_prefix: false,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(events::on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!("{} is online!", ready.user.name);

                presence::on_ready(ctx, Arc::clone(&data.strings));

                Ok(data)
            })
        })
        .build();

    // Create the client and start the bot
    let mut cache_settings = serenity::cache::Settings::default();
    cache_settings.max_messages = 10000;

    let mut client = serenity::ClientBuilder::new(config.token.clone(), intents)
        .framework(framework)
        .cache_settings(cache_settings)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
