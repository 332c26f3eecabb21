pub mod in_memory;
pub mod json_store;
pub mod sqlite_store;

pub use in_memory::InMemorySettingsStore;
pub use json_store::JsonSettingsStore;
pub use sqlite_store::SqliteSettingsStore;
