// In-memory settings backing. No persistence at all; used by tests and
// handy for running the bot without touching disk.

use crate::core::settings::{SettingValue, SettingsStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

pub struct InMemorySettingsStore {
    data: DashMap<u64, HashMap<String, SettingValue>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, guild_id: u64, key: &str) -> Result<Option<SettingValue>, StoreError> {
        Ok(self
            .data
            .get(&guild_id)
            .and_then(|entry| entry.get(key).cloned()))
    }

    async fn get_all(&self, guild_id: u64) -> Result<HashMap<String, SettingValue>, StoreError> {
        Ok(self
            .data
            .get(&guild_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn set(&self, guild_id: u64, key: &str, value: SettingValue) -> Result<(), StoreError> {
        self.data
            .entry(guild_id)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, guild_id: u64, key: &str) -> Result<(), StoreError> {
        if let Some(mut entry) = self.data.get_mut(&guild_id) {
            entry.remove(key);
        }
        Ok(())
    }

    async fn clear(&self, guild_id: u64) -> Result<(), StoreError> {
        self.data.remove(&guild_id);
        Ok(())
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
