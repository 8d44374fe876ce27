// Docmark Settings Engine
// Manages service settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ServiceSettings;

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "DOCMARK_CONFIG";
/// Environment variable naming the directory that holds `docmark.db`.
pub const DATA_DIR_ENV: &str = "DOCMARK_DATA_DIR";

const DATABASE_FILE: &str = "docmark.db";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ServiceSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ServiceSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ServiceSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// Path precedence: `path_override`, then `$DOCMARK_CONFIG`, then
    /// `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override
            .or_else(|| std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| {
                platform::get_config_dir()
                    .join("settings.json")
                    .to_string_lossy()
                    .to_string()
            });

        Self {
            config_path,
            settings: ServiceSettings::default(),
        }
    }

    /// Resolves where the SQLite database lives.
    ///
    /// An explicit `database_path` setting wins, then `$DOCMARK_DATA_DIR`,
    /// then the platform data directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = self.settings.database_path.as_deref().filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(DATABASE_FILE),
            _ => platform::get_data_dir().join(DATABASE_FILE),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    /// Well-formed files with unusable values are rejected with `InvalidValue`.
    fn load(&mut self) -> Result<ServiceSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(subsystem = "settings", path = %self.config_path, "No settings file, using defaults");
            self.settings = ServiceSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ServiceSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        settings.validate()?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Updates a single top-level setting and saves to disk.
    ///
    /// The new value is checked by deserializing and validating the whole
    /// settings object, so a bad value leaves the current settings untouched.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
        }

        let new_settings: ServiceSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        new_settings.validate()?;

        self.settings = new_settings;
        self.save()
    }

    /// Resets all settings to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ServiceSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
