use crate::resolvers::NetworkRegistry;
use crate::types::HomeTab;
use anyhow::{anyhow, Context, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "kestrel_settings.json";

fn default_network_key() -> String {
    "polkadot".to_string()
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// Network shown in the top bar and used for new withdrawals
    #[serde(default = "default_network_key")]
    pub selected_network_key: String,
    /// Replace balances with asterisks
    #[serde(default)]
    pub balances_hidden: bool,
    /// Tab the home screen opens on
    #[serde(default)]
    pub default_home_tab: HomeTab,
    /// SHA-256 of the app PIN, hex encoded. `None` = app is never locked
    #[serde(default)]
    pub pin_hash: Option<String>,
    /// User-chosen display names, keyed by network key
    #[serde(default)]
    pub network_names: HashMap<String, String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_network_key: default_network_key(),
            balances_hidden: false,
            default_home_tab: HomeTab::default(),
            pin_hash: None,
            network_names: HashMap::new(),
        }
    }
}

impl UserSettings {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("kestrel");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str::<Self>(&content) {
                    Ok(mut settings) => {
                        if settings
                            .pin_hash
                            .as_deref()
                            .is_some_and(|hash| PasswordHash::new(hash).is_err())
                        {
                            tracing::warn!("Stored PIN hash is unreadable, PIN must be set again");
                            settings.pin_hash = None;
                        }
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write settings to {:?}", path))?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    pub fn has_pin(&self) -> bool {
        self.pin_hash.is_some()
    }

    /// Store `pin` as a salted Argon2 PHC string
    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|e| anyhow!("Failed to hash PIN: {}", e))?;
        self.pin_hash = Some(hash.to_string());
        Ok(())
    }

    pub fn clear_pin(&mut self) {
        self.pin_hash = None;
    }

    /// Check a PIN. Always true when no PIN is configured.
    pub fn verify_pin(&self, pin: &str) -> bool {
        match &self.pin_hash {
            Some(hash) => match PasswordHash::new(hash) {
                Ok(parsed) => Argon2::default()
                    .verify_password(pin.as_bytes(), &parsed)
                    .is_ok(),
                Err(e) => {
                    tracing::warn!("Stored PIN hash is unreadable: {}", e);
                    false
                }
            },
            None => true,
        }
    }

    /// Set a display name for a network (empty name removes the override)
    pub fn set_network_name(&mut self, network_key: &str, name: &str) {
        if name.trim().is_empty() {
            self.network_names.remove(network_key);
        } else {
            self.network_names
                .insert(network_key.to_string(), name.trim().to_string());
        }
    }

    /// Built-in networks with the user's display names applied
    pub fn network_registry(&self) -> NetworkRegistry {
        let mut registry = NetworkRegistry::builtin();
        for (key, name) in &self.network_names {
            registry.rename(key, name.clone());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::NetworkResolver;

    // ==================== UserSettings::default tests ====================

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();
        assert_eq!(settings.selected_network_key, "polkadot");
        assert!(!settings.balances_hidden);
        assert_eq!(settings.default_home_tab, HomeTab::Crypto);
        assert!(!settings.has_pin());
        assert!(settings.network_names.is_empty());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: UserSettings = serde_json::from_str(r#"{"balances_hidden": true}"#).unwrap();
        assert!(settings.balances_hidden);
        assert_eq!(settings.selected_network_key, "polkadot");
        assert!(settings.pin_hash.is_none());
    }

    // ==================== persistence tests ====================

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let mut settings = UserSettings::default();
        settings.selected_network_key = "kusama".to_string();
        settings.default_home_tab = HomeTab::Staking;
        settings.set_pin("123456").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = UserSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = UserSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(loaded, UserSettings::default());
    }

    #[test]
    fn test_load_corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(UserSettings::load_from(&path), UserSettings::default());
    }

    // ==================== PIN tests ====================

    #[test]
    fn test_verify_pin() {
        let mut settings = UserSettings::default();
        assert!(settings.verify_pin("anything"));

        settings.set_pin("123456").unwrap();
        assert!(settings.verify_pin("123456"));
        assert!(!settings.verify_pin("654321"));
        assert!(!settings.verify_pin(""));

        settings.clear_pin();
        assert!(!settings.has_pin());
    }

    #[test]
    fn test_pin_stored_as_salted_argon2() {
        let mut first = UserSettings::default();
        let mut second = UserSettings::default();
        first.set_pin("123456").unwrap();
        second.set_pin("123456").unwrap();

        let stored = first.pin_hash.clone().unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("123456"));
        // bare SHA-256 of the PIN is 64 hex chars
        assert!(!stored.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first.pin_hash, second.pin_hash);
        assert!(second.verify_pin("123456"));
    }

    #[test]
    fn test_unreadable_pin_hash_dropped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let legacy = "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92";
        fs::write(&path, format!(r#"{{"pin_hash": "{}"}}"#, legacy)).unwrap();

        let loaded = UserSettings::load_from(&path);
        assert!(!loaded.has_pin());
    }

    #[test]
    fn test_verify_rejects_unreadable_hash() {
        let settings = UserSettings {
            pin_hash: Some("not-a-phc-string".to_string()),
            ..UserSettings::default()
        };
        assert!(!settings.verify_pin("123456"));
    }

    // ==================== network name tests ====================

    #[test]
    fn test_network_names_feed_registry() {
        let mut settings = UserSettings::default();
        settings.set_network_name("westend", "  My Westend ");
        let registry = settings.network_registry();
        assert_eq!(registry.display_name("westend"), "My Westend");
        assert_eq!(registry.display_name("kusama"), "Kusama");

        settings.set_network_name("westend", "");
        assert!(settings.network_names.is_empty());
    }
}
