pub mod settings_service;
pub mod settings_store;

pub use settings_service::SettingsService;
pub use settings_store::{default_settings, SettingValue, SettingsStore, StoreError};
