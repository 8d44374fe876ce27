//! App Core for Docmark.
//!
//! Holds the database and the settings it was opened with, and hands out bookmark
//! services bound to the shared connection.

use std::fs;

use tracing::info;

use crate::database::connection::Database;
use crate::services::bookmark_service::BookmarkService;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::stores::bookmark_store::SqliteBookmarkStore;
use crate::types::errors::AppError;

/// Central application struct.
///
/// Services are created on demand via [`App::bookmark_service`] because the
/// store borrows the connection with a lifetime.
pub struct App {
    pub db: Database,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Opens the database named by an already loaded settings engine.
    ///
    /// The engine is used as is; call [`SettingsEngineTrait::load`] first.
    pub fn new(settings_engine: SettingsEngine) -> Result<Self, AppError> {
        let db_path = settings_engine.database_path();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let db = Database::open(&db_path)?;

        info!(
            subsystem = "app",
            config = %settings_engine.get_config_path(),
            database = %db_path.display(),
            "Docmark initialized"
        );
        Ok(Self::from_parts(db, settings_engine))
    }

    /// Assembles an app from an already opened database.
    pub fn from_parts(db: Database, settings_engine: SettingsEngine) -> Self {
        Self { db, settings_engine }
    }

    /// Returns a bookmark service over the app's connection.
    pub fn bookmark_service(&self) -> BookmarkService<SqliteBookmarkStore<'_>> {
        let anonymous = self.settings_engine.get_settings().anonymous_login.clone();
        BookmarkService::new(SqliteBookmarkStore::new(self.db.connection()), anonymous)
    }
}
