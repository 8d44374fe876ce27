use thiserror::Error;

// === BookmarkError ===

/// Errors raised by bookmark validation and persistence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookmarkError {
    /// A required field is missing, or the request violates a state rule.
    #[error("Invalid bookmark: {0}")]
    Validation(String),
    /// The bookmark targeted by the request does not exist.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// The store rejected the write or the backend failed.
    #[error("Bookmark persistence error: {0}")]
    Persistence(String),
}

impl BookmarkError {
    /// HTTP-equivalent status for a rejected request.
    pub fn status_code(&self) -> u16 {
        match self {
            BookmarkError::Validation(_) | BookmarkError::NotFound(_) => 400,
            BookmarkError::Persistence(_) => 500,
        }
    }
}

impl From<rusqlite::Error> for BookmarkError {
    fn from(e: rusqlite::Error) -> Self {
        BookmarkError::Persistence(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to loading and updating service settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O error: {0}")]
    IoError(String),
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === AppError ===

/// Startup failures while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
