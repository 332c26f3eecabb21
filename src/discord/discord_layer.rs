// Discord layer - commands, checks, and event handlers.
//
// Everything here is translation: extract primitives from Discord types,
// call into core, format the result. No business logic.

#[path = "commands/command_catalog.rs"]
pub mod commands;

pub mod checks;
pub mod events;
pub mod prefix;
pub mod presence;
pub mod registry;

use crate::core::commands::CommandCatalog;
use crate::core::config::BotConfig;
use crate::core::permissions::PermissionPolicy;
use crate::core::settings::SettingsService;
use crate::core::strings::StringPool;
use crate::core::tracking::MessageTracker;
use crate::infra::settings::JsonSettingsStore;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands and event handlers.
pub struct Data {
    pub config: Arc<BotConfig>,
    pub settings: Arc<SettingsService<JsonSettingsStore>>,
    pub policy: Arc<PermissionPolicy>,
    pub catalog: Arc<CommandCatalog>,
    pub strings: Arc<StringPool>,
    pub tracker: Arc<MessageTracker>,
}
