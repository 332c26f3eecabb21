use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(String),
}

/// A single guild setting. Settings are a flat bag of scalars so the
/// persisted document stays a plain JSON object per guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Int(i)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Str(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Str(s)
    }
}

/// Process-wide defaults, merged under every guild's overrides.
/// Only settings with a meaningful default appear here; `prefix`
/// deliberately has none.
pub fn default_settings() -> HashMap<String, SettingValue> {
    let mut defaults = HashMap::new();
    defaults.insert("use_default_prefix".to_string(), SettingValue::Bool(true));
    defaults
}

/// Storage contract for per-guild settings. Implementations own the backing
/// document exclusively; the service layer on top handles defaults and
/// error swallowing.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, guild_id: u64, key: &str) -> Result<Option<SettingValue>, StoreError>;
    async fn get_all(&self, guild_id: u64) -> Result<HashMap<String, SettingValue>, StoreError>;
    async fn set(&self, guild_id: u64, key: &str, value: SettingValue) -> Result<(), StoreError>;
    async fn remove(&self, guild_id: u64, key: &str) -> Result<(), StoreError>;
    async fn clear(&self, guild_id: u64) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_json_round_trip() {
        let value: SettingValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, SettingValue::Bool(true));

        let value: SettingValue = serde_json::from_str("\"!!\"").unwrap();
        assert_eq!(value.as_str(), Some("!!"));

        let value: SettingValue = serde_json::from_str("42").unwrap();
        assert_eq!(value.as_int(), Some(42));

        assert_eq!(serde_json::to_string(&SettingValue::Bool(false)).unwrap(), "false");
    }

    #[test]
    fn defaults_contain_prefix_toggle() {
        let defaults = default_settings();
        assert_eq!(
            defaults.get("use_default_prefix").and_then(|v| v.as_bool()),
            Some(true)
        );
        assert!(!defaults.contains_key("prefix"));
    }
}
