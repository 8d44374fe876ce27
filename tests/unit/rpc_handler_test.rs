//! Unit tests for the RPC handler — every JSON-RPC method dispatched by `handle_method`.
//!
//! These tests go through the same code path as the `docmark-rpc` binary,
//! using a temporary on-disk SQLite database.

use std::sync::Mutex;

use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

use docmark::app::App;
use docmark::rpc_handler::handle_method;
use docmark::services::settings_engine::SettingsEngine;
use docmark::stores::bookmark_store::BookmarkStore;

/// Create a fresh App backed by a temp directory.
fn setup() -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let settings_path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(settings_path));
    {
        use docmark::services::settings_engine::SettingsEngineTrait;
        let db_path = tmp.path().join("data").join("test.db");
        engine
            .set_value("database_path", json!(db_path.to_string_lossy()))
            .unwrap();
    }
    let app = App::new(engine).expect("Failed to init App");
    (Mutex::new(app), tmp)
}

fn count(app: &Mutex<App>) -> usize {
    let a = app.lock().unwrap();
    let n = a.bookmark_service().store().count().unwrap();
    n
}

fn bookmark_json(id: Option<Uuid>, document_id: Uuid, created_by: Option<&str>) -> Value {
    json!({
        "id": id,
        "documentId": document_id,
        "name": "My Bookmark",
        "createdBy": created_by,
        "pageNumber": 426,
        "xCoordinate": 32.7,
        "yCoordinate": 100.9
    })
}

// ─── App ───

/// `App::new` opens the database from the engine's current settings, not a fresh read of the file.
#[test]
fn test_app_uses_settings_already_in_engine() {
    use docmark::services::settings_engine::SettingsEngineTrait;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let settings_path = tmp.path().join("settings.json");
    let mut engine = SettingsEngine::new(Some(settings_path.to_string_lossy().to_string()));
    engine.load().unwrap();
    let in_memory = tmp.path().join("loaded.db");
    let on_disk = tmp.path().join("rewritten.db");
    engine
        .set_value("database_path", json!(in_memory.to_string_lossy()))
        .unwrap();
    std::fs::write(
        &settings_path,
        json!({"database_path": on_disk.to_string_lossy()}).to_string(),
    )
    .unwrap();

    let app = App::new(engine).expect("Failed to init App");

    assert!(in_memory.exists());
    assert!(!on_disk.exists());
    assert_eq!(
        app.settings_engine.get_settings().database_path.as_deref(),
        Some(in_memory.to_string_lossy().as_ref())
    );
}

// ─── Ping ───

#[test]
fn test_ping() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "ping", &json!({})).unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body, Some(json!({"pong": true})));
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().message.contains("unknown method"));
}

// ─── Create ───

#[test]
fn test_create_without_id_is_bad_request() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "bookmark.create", &json!({
        "user": "bob",
        "bookmark": bookmark_json(None, Uuid::new_v4(), Some("bob"))
    }))
    .unwrap_err();

    assert_eq!(err.status, 400);
    assert!(err.message.contains("id must not be null"));
    assert_eq!(count(&app), 0);
}

#[test]
fn test_create_without_owner_uses_caller() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "bookmark.create", &json!({
        "user": "fabio",
        "bookmark": bookmark_json(Some(Uuid::new_v4()), Uuid::new_v4(), None)
    }))
    .unwrap();

    assert_eq!(res.status, 201);
    assert_eq!(res.body.unwrap()["createdBy"], "fabio");
    assert_eq!(count(&app), 1);
}

#[test]
fn test_create_with_malformed_uuid_is_bad_request() {
    let (app, _tmp) = setup();
    let mut body = bookmark_json(Some(Uuid::new_v4()), Uuid::new_v4(), None);
    body["documentId"] = json!("not-a-uuid");

    let err = handle_method(&app, "bookmark.create", &json!({"user": "bob", "bookmark": body})).unwrap_err();
    assert_eq!(err.status, 400);
}

// ─── Update ───

#[test]
fn test_update_renames_and_returns_ok() {
    let (app, _tmp) = setup();
    let id = Uuid::new_v4();
    let document_id = Uuid::new_v4();
    handle_method(&app, "bookmark.create", &json!({
        "user": "bob",
        "bookmark": bookmark_json(Some(id), document_id, Some("bob"))
    }))
    .unwrap();

    let mut body = bookmark_json(Some(id), document_id, Some("bob"));
    body["name"] = json!("Updated Bookmark");
    let res = handle_method(&app, "bookmark.update", &json!({"bookmark": body})).unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.body.unwrap()["name"], "Updated Bookmark");
    assert_eq!(count(&app), 1);
}

#[test]
fn test_update_without_id_is_bad_request() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "bookmark.update", &json!({
        "bookmark": bookmark_json(None, Uuid::new_v4(), Some("bob"))
    }))
    .unwrap_err();

    assert_eq!(err.status, 400);
    assert_eq!(count(&app), 0);
}

#[test]
fn test_update_unknown_id_is_bad_request() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "bookmark.update", &json!({
        "bookmark": bookmark_json(Some(Uuid::new_v4()), Uuid::new_v4(), Some("bob"))
    }))
    .unwrap_err();

    assert_eq!(err.status, 400);
    assert!(err.message.contains("not found"));
    assert_eq!(count(&app), 0);
}

// ─── Lookup ───

#[test]
fn test_by_document_ok_for_owner_and_no_content_for_others() {
    let (app, _tmp) = setup();
    let id = Uuid::new_v4();
    let document_id = Uuid::new_v4();
    handle_method(&app, "bookmark.create", &json!({
        "user": "bob",
        "bookmark": bookmark_json(Some(id), document_id, Some("bob"))
    }))
    .unwrap();

    let res = handle_method(&app, "bookmark.byDocument", &json!({
        "user": "bob",
        "documentId": document_id.to_string()
    }))
    .unwrap();
    assert_eq!(res.status, 200);
    let body = res.body.unwrap();
    let arr = body.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], id.to_string());
    assert_eq!(arr[0]["name"], "My Bookmark");

    let res = handle_method(&app, "bookmark.byDocument", &json!({
        "user": "fabio",
        "documentId": document_id.to_string()
    }))
    .unwrap();
    assert_eq!(res.status, 204);
    assert!(res.body.is_none());
}

#[test]
fn test_by_document_matches_padded_user_verbatim() {
    let (app, _tmp) = setup();
    let id = Uuid::new_v4();
    let document_id = Uuid::new_v4();
    handle_method(&app, "bookmark.create", &json!({
        "user": "bob",
        "bookmark": bookmark_json(Some(id), document_id, Some(" bob "))
    }))
    .unwrap();

    let res = handle_method(&app, "bookmark.byDocument", &json!({
        "user": " bob ",
        "documentId": document_id.to_string()
    }))
    .unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body.unwrap()[0]["createdBy"], " bob ");
}

#[test]
fn test_get_missing_is_bad_request() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "bookmark.get", &json!({"id": Uuid::new_v4().to_string()})).unwrap_err();
    assert_eq!(err.status, 400);

    let err = handle_method(&app, "bookmark.get", &json!({})).unwrap_err();
    assert_eq!(err.message, "missing id");
}

// ─── Delete ───

#[test]
fn test_delete_is_ok_whether_or_not_present() {
    let (app, _tmp) = setup();
    let id = Uuid::new_v4();
    handle_method(&app, "bookmark.create", &json!({
        "user": "bob",
        "bookmark": bookmark_json(Some(id), Uuid::new_v4(), None)
    }))
    .unwrap();

    let res = handle_method(&app, "bookmark.delete", &json!({"id": id.to_string()})).unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(count(&app), 0);

    let res = handle_method(&app, "bookmark.delete", &json!({"id": id.to_string()})).unwrap();
    assert_eq!(res.status, 200);
}
