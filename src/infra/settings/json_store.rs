// Flat-file settings backing: one JSON document mapping guild-id strings to
// flat scalar objects, rewritten in full on every mutation.
//
// Load failures degrade to an empty store so a corrupt document can never
// keep the bot from starting. Writes go through a temp file followed by a
// rename so a crash mid-write leaves the previous document intact.

use crate::core::settings::{SettingValue, SettingsStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

type GuildSettingsMap = HashMap<u64, HashMap<String, SettingValue>>;

pub struct JsonSettingsStore {
    path: PathBuf,
    cache: RwLock<GuildSettingsMap>,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = Self::load(&path);
        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    fn load(path: &PathBuf) -> GuildSettingsMap {
        if !path.exists() {
            tracing::info!("{} not found, starting with empty settings", path.display());
            return GuildSettingsMap::new();
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("failed to read {}: {}", path.display(), err);
                return GuildSettingsMap::new();
            }
        };

        match serde_json::from_str::<GuildSettingsMap>(&text) {
            Ok(map) => {
                tracing::info!("loaded settings for {} guilds", map.len());
                map
            }
            Err(err) => {
                tracing::warn!("failed to parse {}: {}", path.display(), err);
                GuildSettingsMap::new()
            }
        }
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let cache = self.cache.read().await;
        let text = serde_json::to_string_pretty(&*cache)?;
        drop(cache);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write-temp-then-rename so a partial write can't corrupt the
        // previous document.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn get(&self, guild_id: u64, key: &str) -> Result<Option<SettingValue>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.get(&guild_id).and_then(|m| m.get(key)).cloned())
    }

    async fn get_all(&self, guild_id: u64) -> Result<HashMap<String, SettingValue>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn set(&self, guild_id: u64, key: &str, value: SettingValue) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        cache.entry(guild_id).or_default().insert(key.to_string(), value);
        drop(cache); // Release lock before persisting
        self.persist().await
    }

    async fn remove(&self, guild_id: u64, key: &str) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        let removed = cache
            .get_mut(&guild_id)
            .map(|m| m.remove(key).is_some())
            .unwrap_or(false);
        drop(cache);

        if removed {
            self.persist().await?;
        }
        Ok(())
    }

    async fn clear(&self, guild_id: u64) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        let existed = cache.remove(&guild_id).is_some();
        drop(cache);

        if existed {
            self.persist().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_path() -> PathBuf {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_owned();
        drop(tmp);
        path
    }

    #[tokio::test]
    async fn persistence_round_trip() {
        let path = temp_path();

        let store = JsonSettingsStore::new(path.clone());
        store.set(7, "prefix", SettingValue::from("!!")).await.unwrap();
        store
            .set(7, "use_default_prefix", SettingValue::Bool(false))
            .await
            .unwrap();

        // Reload from file
        let store2 = JsonSettingsStore::new(path.clone());
        let all = store2.get_all(7).await.unwrap();
        assert_eq!(all.get("prefix").and_then(|v| v.as_str()), Some("!!"));
        assert_eq!(
            all.get("use_default_prefix").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[tokio::test]
    async fn corrupt_document_degrades_to_empty() {
        let path = temp_path();
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = JsonSettingsStore::new(path.clone());
        assert!(store.get_all(1).await.unwrap().is_empty());

        // The store still accepts writes afterwards.
        store.set(1, "prefix", SettingValue::from("~")).await.unwrap();
        let reloaded = JsonSettingsStore::new(path);
        assert_eq!(
            reloaded.get(1, "prefix").await.unwrap().and_then(|v| v.as_str().map(String::from)),
            Some("~".to_string())
        );
    }

    #[tokio::test]
    async fn clear_removes_the_guild_from_disk() {
        let path = temp_path();

        let store = JsonSettingsStore::new(path.clone());
        store.set(3, "prefix", SettingValue::from("!!")).await.unwrap();
        store.clear(3).await.unwrap();
        store.clear(3).await.unwrap(); // second clear is a no-op

        let reloaded = JsonSettingsStore::new(path);
        assert!(reloaded.get_all(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn document_keys_are_guild_id_strings() {
        let path = temp_path();

        let store = JsonSettingsStore::new(path.clone());
        store.set(42, "prefix", SettingValue::from("!")).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(doc.get("42").is_some());
    }
}
