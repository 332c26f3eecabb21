// Process-wide configuration, read once at startup and passed to the
// services that need it. Nothing else in the crate touches the environment.

use std::path::PathBuf;

/// Prefixes every guild starts with until it configures its own.
pub const DEFAULT_PREFIXES: &[&str] = &["-", "?", "!", "."];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN (or legacy TOKEN) is not set")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    /// User ids (string form of the snowflake) exempt from permission checks.
    pub bot_masters: Vec<String>,
    pub default_prefixes: Vec<String>,
    pub settings_path: PathBuf,
    pub strings_path: PathBuf,
}

impl BotConfig {
    /// Read configuration from the environment. `dotenv` must already have
    /// been loaded by the caller; missing token is the only fatal condition.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("DISCORD_TOKEN")
            .or_else(|_| std::env::var("TOKEN"))
            .map_err(|_| ConfigError::MissingToken)?;

        let bot_masters = std::env::var("BOT_MASTERS")
            .map(|raw| parse_id_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            token,
            bot_masters,
            default_prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            settings_path: PathBuf::from("data/settings.json"),
            strings_path: PathBuf::from("data/strings.json"),
        })
    }
}

/// Split a comma-separated id list, dropping empty fragments.
fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_masters() {
        let masters = parse_id_list("123456789012345678, 987654321098765432");
        assert_eq!(masters, vec!["123456789012345678", "987654321098765432"]);
    }

    #[test]
    fn ignores_empty_fragments() {
        assert!(parse_id_list("").is_empty());
        assert_eq!(parse_id_list(" , 42,, ").len(), 1);
    }
}
