//! RPC method handler for the Docmark JSON-RPC protocol.
//!
//! Translates JSON requests into bookmark service calls and service results
//! into HTTP-equivalent statuses. Kept apart from `rpc_server.rs` so it can be
//! unit-tested without stdin/stdout.

use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::App;
use crate::services::bookmark_service::BookmarkServiceTrait;
use crate::types::bookmark::BookmarkInput;
use crate::types::errors::BookmarkError;
use crate::types::identity::CurrentUser;
use crate::types::outcome::Outcome;

/// A handled request: status code plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
    pub status: u16,
    pub body: Option<Value>,
}

/// A rejected request.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcFailure {
    pub status: u16,
    pub message: String,
}

impl RpcFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
        }
    }
}

impl From<BookmarkError> for RpcFailure {
    fn from(err: BookmarkError) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

fn reply<T: serde::Serialize>(outcome: Outcome<T>) -> Result<RpcReply, RpcFailure> {
    let status = outcome.status().code();
    let body = match outcome.into_inner() {
        Some(v) => Some(serde_json::to_value(v).map_err(|e| RpcFailure::internal(e.to_string()))?),
        None => None,
    };
    Ok(RpcReply { status, body })
}

/// Reads the caller's login from `params.user`.
fn identity(params: &Value) -> CurrentUser {
    CurrentUser::from_login(params.get("user").and_then(|v| v.as_str()))
}

fn uuid_param(params: &Value, key: &str) -> Result<Uuid, RpcFailure> {
    let raw = params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcFailure::bad_request(format!("missing {}", key)))?;
    Uuid::parse_str(raw).map_err(|e| RpcFailure::bad_request(format!("invalid {}: {}", key, e)))
}

fn bookmark_param(params: &Value) -> Result<BookmarkInput, RpcFailure> {
    let raw = params
        .get("bookmark")
        .cloned()
        .ok_or_else(|| RpcFailure::bad_request("missing bookmark"))?;
    serde_json::from_value(raw).map_err(|e| RpcFailure::bad_request(format!("invalid bookmark: {}", e)))
}

fn lock(app: &Mutex<App>) -> Result<MutexGuard<'_, App>, RpcFailure> {
    app.lock().map_err(|e| RpcFailure::internal(e.to_string()))
}

/// Dispatch a JSON-RPC method call to the bookmark service.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<RpcReply, RpcFailure> {
    let user = identity(params);

    match method {
        "ping" => Ok(RpcReply {
            status: 200,
            body: Some(json!({"pong": true})),
        }),

        // ─── Bookmarks ───
        "bookmark.create" => {
            let input = bookmark_param(params)?;
            let a = lock(app)?;
            let outcome = a.bookmark_service().create(input, &user)?;
            reply(outcome)
        }
        "bookmark.update" => {
            let input = bookmark_param(params)?;
            let a = lock(app)?;
            let outcome = a.bookmark_service().update(input, &user)?;
            reply(outcome)
        }
        "bookmark.get" => {
            let id = uuid_param(params, "id")?;
            let a = lock(app)?;
            let outcome = a.bookmark_service().get(&id, &user)?;
            reply(outcome)
        }
        "bookmark.byDocument" => {
            let document_id = uuid_param(params, "documentId")?;
            let a = lock(app)?;
            let outcome = a.bookmark_service().find_by_document_id(&document_id, &user)?;
            reply(outcome)
        }
        "bookmark.delete" => {
            let id = uuid_param(params, "id")?;
            let a = lock(app)?;
            let outcome = a.bookmark_service().delete_by_id(&id, &user)?;
            Ok(RpcReply {
                status: outcome.status().code(),
                body: Some(json!({"ok": true})),
            })
        }

        _ => Err(RpcFailure::bad_request(format!("unknown method: {}", method))),
    }
}
