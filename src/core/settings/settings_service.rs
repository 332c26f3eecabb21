// Per-guild settings with process-wide defaults layered underneath.
//
// The service never surfaces persistence problems to callers: a failed read
// behaves like an empty store and a failed write leaves the in-memory state
// authoritative until the next successful save. Both are logged.

use std::collections::HashMap;

use super::settings_store::{SettingValue, SettingsStore};

pub struct SettingsService<S: SettingsStore> {
    store: S,
    defaults: HashMap<String, SettingValue>,
}

impl<S: SettingsStore> SettingsService<S> {
    pub fn new(store: S, defaults: HashMap<String, SettingValue>) -> Self {
        Self { store, defaults }
    }

    /// Guild override if present, else the process default, else `None`.
    pub async fn get(&self, guild_id: u64, key: &str) -> Option<SettingValue> {
        match self.store.get(guild_id, key).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => self.defaults.get(key).cloned(),
            Err(err) => {
                tracing::warn!(guild_id, key, "settings read failed: {}", err);
                self.defaults.get(key).cloned()
            }
        }
    }

    /// Defaults merged with the guild's overrides; overrides win.
    pub async fn get_all(&self, guild_id: u64) -> HashMap<String, SettingValue> {
        let overrides = match self.store.get_all(guild_id).await {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(guild_id, "settings read failed: {}", err);
                HashMap::new()
            }
        };

        let mut merged = self.defaults.clone();
        merged.extend(overrides);
        merged
    }

    pub async fn set(&self, guild_id: u64, key: &str, value: impl Into<SettingValue>) {
        if let Err(err) = self.store.set(guild_id, key, value.into()).await {
            tracing::error!(guild_id, key, "settings write failed: {}", err);
        }
    }

    pub async fn remove(&self, guild_id: u64, key: &str) {
        if let Err(err) = self.store.remove(guild_id, key).await {
            tracing::error!(guild_id, key, "settings remove failed: {}", err);
        }
    }

    pub async fn clear(&self, guild_id: u64) {
        if let Err(err) = self.store.clear(guild_id).await {
            tracing::error!(guild_id, "settings clear failed: {}", err);
        }
    }

    /// The guild's custom prefix, if one is configured and non-empty.
    pub async fn custom_prefix(&self, guild_id: u64) -> Option<String> {
        self.get(guild_id, "prefix")
            .await
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .filter(|p| !p.is_empty())
    }

    /// Whether the guild still accepts the built-in prefixes (default true).
    pub async fn use_default_prefix(&self, guild_id: u64) -> bool {
        self.get(guild_id, "use_default_prefix")
            .await
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::default_settings;
    use crate::infra::settings::InMemorySettingsStore;

    fn service() -> SettingsService<InMemorySettingsStore> {
        SettingsService::new(InMemorySettingsStore::new(), default_settings())
    }

    #[tokio::test]
    async fn writes_do_not_leak_across_guilds() {
        let settings = service();
        settings.set(1, "prefix", "!!").await;

        assert_eq!(settings.custom_prefix(1).await.as_deref(), Some("!!"));
        assert_eq!(settings.custom_prefix(2).await, None);
    }

    #[tokio::test]
    async fn get_all_always_contains_defaults() {
        let settings = service();

        // A guild nobody ever wrote to still sees every default.
        let merged = settings.get_all(99).await;
        assert_eq!(
            merged.get("use_default_prefix").and_then(|v| v.as_bool()),
            Some(true)
        );

        // Overrides win on collision.
        settings.set(99, "use_default_prefix", false).await;
        let merged = settings.get_all(99).await;
        assert_eq!(
            merged.get("use_default_prefix").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[tokio::test]
    async fn round_trips_primitive_values() {
        let settings = service();

        settings.set(5, "prefix", "~").await;
        settings.set(5, "use_default_prefix", false).await;
        settings.set(5, "delete_delay", 30i64).await;

        assert_eq!(
            settings.get(5, "prefix").await.as_ref().and_then(|v| v.as_str()),
            Some("~")
        );
        assert_eq!(settings.use_default_prefix(5).await, false);
        assert_eq!(
            settings.get(5, "delete_delay").await.and_then(|v| v.as_int()),
            Some(30)
        );
    }

    #[tokio::test]
    async fn remove_falls_back_to_default() {
        let settings = service();

        settings.set(7, "use_default_prefix", false).await;
        settings.remove(7, "use_default_prefix").await;

        // Not `None`: the recognized key still resolves to its default.
        assert_eq!(
            settings
                .get(7, "use_default_prefix")
                .await
                .and_then(|v| v.as_bool()),
            Some(true)
        );
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let settings = service();

        settings.set(3, "prefix", "!!").await;
        settings.clear(3).await;
        let after_first = settings.get_all(3).await;

        settings.clear(3).await;
        let after_second = settings.get_all(3).await;

        assert_eq!(after_first, after_second);
        assert_eq!(settings.custom_prefix(3).await, None);
    }

    #[tokio::test]
    async fn unknown_keys_resolve_to_none() {
        let settings = service();
        assert_eq!(settings.get(1, "no_such_setting").await, None);
    }
}
