use docmark::types::errors::*;

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::Validation("id must not be null".to_string()).to_string(),
        "Invalid bookmark: id must not be null"
    );
    assert_eq!(
        BookmarkError::NotFound("bm-1".to_string()).to_string(),
        "Bookmark not found: bm-1"
    );
    assert_eq!(
        BookmarkError::Persistence("connection lost".to_string()).to_string(),
        "Bookmark persistence error: connection lost"
    );
}

#[test]
fn bookmark_error_status_codes() {
    assert_eq!(BookmarkError::Validation(String::new()).status_code(), 400);
    assert_eq!(BookmarkError::NotFound(String::new()).status_code(), 400);
    assert_eq!(BookmarkError::Persistence(String::new()).status_code(), 500);
}

#[test]
fn rusqlite_errors_become_persistence_errors() {
    let err: BookmarkError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, BookmarkError::Persistence(_)));
}

#[test]
fn bookmark_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("file not found".to_string()).to_string(),
        "Settings I/O error: file not found"
    );
    assert_eq!(
        SettingsError::SerializationError("malformed json".to_string()).to_string(),
        "Settings serialization error: malformed json"
    );
    assert_eq!(
        SettingsError::InvalidKey("unknown.key".to_string()).to_string(),
        "Invalid settings key: unknown.key"
    );
    assert_eq!(
        SettingsError::InvalidValue("negative number".to_string()).to_string(),
        "Invalid settings value: negative number"
    );
}

// === AppError Tests ===

#[test]
fn app_error_wraps_settings_error_transparently() {
    let err = AppError::from(SettingsError::InvalidKey("x".to_string()));
    assert_eq!(err.to_string(), "Invalid settings key: x");
}
