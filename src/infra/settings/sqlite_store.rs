// SQLite settings backing: the same contract as the JSON store, keyed
// (guild_id, key) with values stored as their JSON scalar encoding. Swapping
// this in for the flat file is a one-line change in main.

use crate::core::settings::{SettingValue, SettingsStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::collections::HashMap;
use std::path::Path;

pub struct SqliteSettingsStore {
    pool: Pool<Sqlite>,
}

impl SqliteSettingsStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure the file exists if it's a file path
        let path_str = database_url.trim_start_matches("sqlite://");
        if !database_url.contains(":memory:") && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{}", database_url)
        };

        let pool = SqlitePoolOptions::new().connect(&conn_str).await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guild_settings (
                guild_id INTEGER NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (guild_id, key)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn decode(raw: &str) -> Result<SettingValue, StoreError> {
    serde_json::from_str(raw).map_err(StoreError::Serialization)
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, guild_id: u64, key: &str) -> Result<Option<SettingValue>, StoreError> {
        let row = sqlx::query("SELECT value FROM guild_settings WHERE guild_id = ? AND key = ?")
            .bind(guild_id as i64)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match row {
            Some(row) => {
                let raw: String = row.get("value");
                Ok(Some(decode(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self, guild_id: u64) -> Result<HashMap<String, SettingValue>, StoreError> {
        let rows = sqlx::query("SELECT key, value FROM guild_settings WHERE guild_id = ?")
            .bind(guild_id as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            let key: String = row.get("key");
            let raw: String = row.get("value");
            map.insert(key, decode(&raw)?);
        }
        Ok(map)
    }

    async fn set(&self, guild_id: u64, key: &str, value: SettingValue) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&value)?;

        sqlx::query(
            r#"
            INSERT INTO guild_settings (guild_id, key, value)
            VALUES (?, ?, ?)
            ON CONFLICT(guild_id, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(guild_id as i64)
        .bind(key)
        .bind(encoded)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, guild_id: u64, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM guild_settings WHERE guild_id = ? AND key = ?")
            .bind(guild_id as i64)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, guild_id: u64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM guild_settings WHERE guild_id = ?")
            .bind(guild_id as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteSettingsStore {
        SqliteSettingsStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn round_trips_values() {
        let store = store().await;

        store.set(1, "prefix", SettingValue::from("!!")).await.unwrap();
        store.set(1, "use_default_prefix", SettingValue::Bool(false)).await.unwrap();

        assert_eq!(
            store.get(1, "prefix").await.unwrap().and_then(|v| v.as_str().map(String::from)),
            Some("!!".to_string())
        );

        let all = store.get_all(1).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(
            all.get("use_default_prefix").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[tokio::test]
    async fn overwrites_on_conflict() {
        let store = store().await;
        store.set(1, "prefix", SettingValue::from("!")).await.unwrap();
        store.set(1, "prefix", SettingValue::from("?")).await.unwrap();

        assert_eq!(
            store.get(1, "prefix").await.unwrap().and_then(|v| v.as_str().map(String::from)),
            Some("?".to_string())
        );
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let store = store().await;
        store.set(1, "a", SettingValue::Int(1)).await.unwrap();
        store.set(1, "b", SettingValue::Int(2)).await.unwrap();
        store.set(2, "a", SettingValue::Int(3)).await.unwrap();

        store.remove(1, "a").await.unwrap();
        assert!(store.get(1, "a").await.unwrap().is_none());

        store.clear(1).await.unwrap();
        assert!(store.get_all(1).await.unwrap().is_empty());

        // Other guilds are untouched.
        assert_eq!(
            store.get(2, "a").await.unwrap().and_then(|v| v.as_int()),
            Some(3)
        );
    }
}
