use serde::{Deserialize, Serialize};

use crate::types::errors::SettingsError;

/// Runtime settings for the bookmark service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceSettings {
    /// Explicit SQLite file path. When unset, the data directory is used.
    pub database_path: Option<String>,
    /// Owner stamped on bookmarks created without any resolvable user.
    pub anonymous_login: String,
    /// `tracing` filter directive used when `DOCMARK_LOG` is not set.
    pub log_filter: String,
    /// Requests accepted per second by the RPC server. Must be at least 1.
    pub rate_limit_per_second: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            anonymous_login: "anonymous".to_string(),
            log_filter: "docmark=info".to_string(),
            rate_limit_per_second: 200,
        }
    }
}

impl ServiceSettings {
    /// Rejects values that parse but would leave the service unusable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rate_limit_per_second == 0 {
            return Err(SettingsError::InvalidValue(
                "rate_limit_per_second must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
