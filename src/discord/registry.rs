// Bridges the framework's command list into the core catalog used by help
// and discovery. Built once at startup; a name/alias collision is a
// programming error and aborts startup.

use crate::core::commands::{CatalogError, CommandCatalog, CommandEntry};
use crate::discord::checks;
use crate::discord::{Data, Error};

/// Positional signature in help style: required args in angle brackets,
/// optional ones in square brackets, subcommand placeholder for groups.
fn signature(command: &poise::Command<Data, Error>) -> String {
    if !command.subcommands.is_empty() {
        return format!("{} <subcommand>", command.name);
    }

    let mut parts = vec![command.name.clone()];
    for parameter in &command.parameters {
        if parameter.required {
            parts.push(format!("<{}>", parameter.name));
        } else {
            parts.push(format!("[{}]", parameter.name));
        }
    }
    parts.join(" ")
}

fn help_text(command: &poise::Command<Data, Error>) -> String {
    match (&command.description, &command.help_text) {
        (Some(description), Some(help)) => format!("{}\n{}", description, help),
        (Some(description), None) => description.clone(),
        (None, Some(help)) => help.clone(),
        (None, None) => "No description available".to_string(),
    }
}

pub fn build_catalog(commands: &[poise::Command<Data, Error>]) -> Result<CommandCatalog, CatalogError> {
    let entries = commands
        .iter()
        .map(|command| CommandEntry {
            name: command.name.clone(),
            aliases: command.aliases.clone(),
            category: command
                .category
                .clone()
                .unwrap_or_else(|| "Casual".to_string()),
            hidden: command.hide_in_help,
            help: help_text(command),
            signature: signature(command),
            required_capabilities: checks::required_capabilities(&command.name)
                .iter()
                .map(|c| c.to_string())
                .collect(),
            bot_master_only: checks::is_bot_master_command(&command.name),
        })
        .collect();

    CommandCatalog::new(entries)
}
