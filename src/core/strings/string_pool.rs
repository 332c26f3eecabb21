// Static response strings (status rotation, ping replies), loaded once at
// startup. A missing or broken file is not an error condition: the pool just
// answers with the built-in fallbacks.

use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_STATUS: &str = "Online";
pub const DEFAULT_PING_REPLY: &str = "Hello!";

#[derive(Default)]
pub struct StringPool {
    lists: HashMap<String, Vec<String>>,
}

impl StringPool {
    /// Load the pool from a JSON document of string arrays. Degrades to an
    /// empty pool with a warning on any read or parse failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("{} not readable ({}); using default strings", path.display(), err);
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, Vec<String>>>(&text) {
            Ok(lists) => Self { lists },
            Err(err) => {
                tracing::warn!("failed to parse {} ({}); using default strings", path.display(), err);
                Self::default()
            }
        }
    }

    #[cfg(test)]
    pub fn from_lists(lists: HashMap<String, Vec<String>>) -> Self {
        Self { lists }
    }

    /// A uniformly random pick from the named list, or `fallback` when the
    /// list is absent or empty.
    pub fn random(&self, key: &str, fallback: &str) -> String {
        self.lists
            .get(key)
            .and_then(|list| list.choose(&mut rand::thread_rng()))
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn random_status(&self) -> String {
        self.random("status", DEFAULT_STATUS)
    }

    pub fn random_ping_reply(&self) -> String {
        self.random("ping_responses", DEFAULT_PING_REPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_degrades_to_defaults() {
        let pool = StringPool::load("data/does-not-exist.json");
        assert_eq!(pool.random_status(), DEFAULT_STATUS);
        assert_eq!(pool.random_ping_reply(), DEFAULT_PING_REPLY);
    }

    #[test]
    fn picks_from_the_named_list() {
        let mut lists = HashMap::new();
        lists.insert("status".to_string(), vec!["counting crows".to_string()]);
        let pool = StringPool::from_lists(lists);

        assert_eq!(pool.random_status(), "counting crows");
        // Unrelated keys still fall back.
        assert_eq!(pool.random("eightball", "Ask again"), "Ask again");
    }

    #[test]
    fn empty_list_falls_back() {
        let mut lists = HashMap::new();
        lists.insert("status".to_string(), Vec::new());
        let pool = StringPool::from_lists(lists);
        assert_eq!(pool.random_status(), DEFAULT_STATUS);
    }
}
