//! Bookmark Service for Docmark.
//!
//! Implements `BookmarkServiceTrait`: validates incoming records, stamps
//! ownership from the caller's identity, and filters document listings down
//! to the bookmarks the caller owns. Each operation runs inside one store
//! transaction, and all validation happens before the first write.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::stores::bookmark_store::BookmarkStore;
use crate::types::bookmark::{Bookmark, BookmarkInput};
use crate::types::errors::BookmarkError;
use crate::types::identity::IdentityProvider;
use crate::types::outcome::Outcome;

/// Trait defining bookmark business operations.
///
/// The caller's identity is passed explicitly on every call.
pub trait BookmarkServiceTrait {
    fn create(&self, input: BookmarkInput, identity: &dyn IdentityProvider) -> Result<Outcome<Bookmark>, BookmarkError>;
    fn update(&self, input: BookmarkInput, identity: &dyn IdentityProvider) -> Result<Outcome<Bookmark>, BookmarkError>;
    fn delete_by_id(&self, id: &Uuid, identity: &dyn IdentityProvider) -> Result<Outcome<()>, BookmarkError>;
    fn find_by_document_id(&self, document_id: &Uuid, identity: &dyn IdentityProvider) -> Result<Outcome<Vec<Bookmark>>, BookmarkError>;
    fn get(&self, id: &Uuid, identity: &dyn IdentityProvider) -> Result<Outcome<Bookmark>, BookmarkError>;
}

/// Fields every persisted bookmark needs, checked before any store call.
struct RequiredFields {
    id: Uuid,
    document_id: Uuid,
    name: String,
    page_number: i32,
    x_coordinate: f64,
    y_coordinate: f64,
}

impl RequiredFields {
    fn from_input(input: &BookmarkInput) -> Result<Self, BookmarkError> {
        let id = require(input.id, "id")?;
        let document_id = require(input.document_id, "documentId")?;
        let name = require(input.name.clone(), "name")?;
        if name.trim().is_empty() {
            return Err(BookmarkError::Validation("name must not be blank".to_string()));
        }
        let page_number = require(input.page_number, "pageNumber")?;
        let x_coordinate = require_coordinate(input.x_coordinate, "xCoordinate")?;
        let y_coordinate = require_coordinate(input.y_coordinate, "yCoordinate")?;

        Ok(Self {
            id,
            document_id,
            name,
            page_number,
            x_coordinate,
            y_coordinate,
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, BookmarkError> {
    value.ok_or_else(|| BookmarkError::Validation(format!("{} must not be null", field)))
}

fn require_coordinate(value: Option<f64>, field: &str) -> Result<f64, BookmarkError> {
    let value = require(value, field)?;
    if !value.is_finite() {
        return Err(BookmarkError::Validation(format!("{} must be a finite number", field)));
    }
    Ok(value)
}

/// Bookmark service over any `BookmarkStore`.
pub struct BookmarkService<S: BookmarkStore> {
    store: S,
    anonymous_login: String,
}

impl<S: BookmarkStore> BookmarkService<S> {
    /// Creates a service that stamps `anonymous_login` as owner when a
    /// bookmark is created with no owner and no signed-in user.
    pub fn new(store: S, anonymous_login: impl Into<String>) -> Self {
        Self {
            store,
            anonymous_login: anonymous_login.into(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Caller-supplied owner wins; otherwise the current user, then the anonymous marker.
    fn resolve_owner(&self, supplied: Option<String>, identity: &dyn IdentityProvider) -> String {
        supplied
            .filter(|owner| !owner.trim().is_empty())
            .or_else(|| identity.current_user_login())
            .unwrap_or_else(|| self.anonymous_login.clone())
    }
}

fn rejected(op: &str, user: Option<&str>, err: BookmarkError) -> BookmarkError {
    warn!(subsystem = "bookmarks", op, user = user.unwrap_or("-"), error = %err, "Request rejected");
    err
}

impl<S: BookmarkStore> BookmarkServiceTrait for BookmarkService<S> {
    /// Persists a new bookmark. The id must be supplied by the caller.
    fn create(&self, input: BookmarkInput, identity: &dyn IdentityProvider) -> Result<Outcome<Bookmark>, BookmarkError> {
        let user = identity.current_user_login();
        let fields = RequiredFields::from_input(&input).map_err(|e| rejected("create", user.as_deref(), e))?;
        let created_by = self.resolve_owner(input.created_by, identity);
        let now = Self::now();

        let bookmark = Bookmark {
            id: fields.id,
            document_id: fields.document_id,
            name: fields.name,
            created_by,
            page_number: fields.page_number,
            x_coordinate: fields.x_coordinate,
            y_coordinate: fields.y_coordinate,
            created_at: now,
            last_modified_by: None,
            updated_at: now,
        };

        let saved = self
            .store
            .in_transaction(|store| {
                if store.find_by_id(&bookmark.id)?.is_some() {
                    return Err(BookmarkError::Validation(format!(
                        "bookmark {} already exists",
                        bookmark.id
                    )));
                }
                store.save(&bookmark)
            })
            .map_err(|e| rejected("create", user.as_deref(), e))?;

        info!(
            subsystem = "bookmarks",
            op = "create",
            bookmark_id = %saved.id,
            document_id = %saved.document_id,
            owner = %saved.created_by,
            "Bookmark created"
        );
        Ok(Outcome::Created(saved))
    }

    /// Replaces the mutable fields of an existing bookmark.
    ///
    /// Identity, document and ownership are carried over from the stored
    /// record; a differing `documentId` is rejected.
    fn update(&self, input: BookmarkInput, identity: &dyn IdentityProvider) -> Result<Outcome<Bookmark>, BookmarkError> {
        let user = identity.current_user_login();
        let fields = RequiredFields::from_input(&input).map_err(|e| rejected("update", user.as_deref(), e))?;

        let saved = self
            .store
            .in_transaction(|store| {
                let existing = store
                    .find_by_id(&fields.id)?
                    .ok_or_else(|| BookmarkError::NotFound(fields.id.to_string()))?;

                if existing.document_id != fields.document_id {
                    return Err(BookmarkError::Validation(format!(
                        "documentId of bookmark {} cannot change",
                        existing.id
                    )));
                }

                let replacement = Bookmark {
                    name: fields.name.clone(),
                    page_number: fields.page_number,
                    x_coordinate: fields.x_coordinate,
                    y_coordinate: fields.y_coordinate,
                    last_modified_by: user.clone(),
                    updated_at: Self::now(),
                    ..existing
                };
                store.save(&replacement)
            })
            .map_err(|e| rejected("update", user.as_deref(), e))?;

        info!(
            subsystem = "bookmarks",
            op = "update",
            bookmark_id = %saved.id,
            user = user.as_deref().unwrap_or("-"),
            "Bookmark updated"
        );
        Ok(Outcome::Ok(saved))
    }

    /// Removes a bookmark. Succeeds whether or not it existed.
    fn delete_by_id(&self, id: &Uuid, identity: &dyn IdentityProvider) -> Result<Outcome<()>, BookmarkError> {
        let user = identity.current_user_login();
        let removed = self
            .store
            .in_transaction(|store| store.delete_by_id(id))
            .map_err(|e| rejected("delete", user.as_deref(), e))?;

        info!(
            subsystem = "bookmarks",
            op = "delete",
            bookmark_id = %id,
            removed,
            user = user.as_deref().unwrap_or("-"),
            "Bookmark delete handled"
        );
        Ok(Outcome::Ok(()))
    }

    /// Lists the caller's bookmarks on a document.
    ///
    /// Bookmarks owned by other users are never returned. An empty visible
    /// set is `NoContent`, not an error.
    fn find_by_document_id(&self, document_id: &Uuid, identity: &dyn IdentityProvider) -> Result<Outcome<Vec<Bookmark>>, BookmarkError> {
        let Some(login) = identity.current_user_login() else {
            debug!(subsystem = "bookmarks", op = "find_by_document", document_id = %document_id, "No current user");
            return Ok(Outcome::NoContent);
        };

        let all = self
            .store
            .in_transaction(|store| store.find_by_document_id(document_id))
            .map_err(|e| rejected("find_by_document", Some(login.as_str()), e))?;
        let total = all.len();

        let visible: Vec<Bookmark> = all.into_iter().filter(|b| b.created_by == login).collect();

        debug!(
            subsystem = "bookmarks",
            op = "find_by_document",
            document_id = %document_id,
            user = %login,
            total,
            visible = visible.len(),
            "Document bookmarks filtered"
        );

        if visible.is_empty() {
            Ok(Outcome::NoContent)
        } else {
            Ok(Outcome::Ok(visible))
        }
    }

    fn get(&self, id: &Uuid, identity: &dyn IdentityProvider) -> Result<Outcome<Bookmark>, BookmarkError> {
        let user = identity.current_user_login();
        let found = self
            .store
            .in_transaction(|store| store.find_by_id(id))
            .map_err(|e| rejected("get", user.as_deref(), e))?;

        match found {
            Some(bookmark) => Ok(Outcome::Ok(bookmark)),
            None => Err(rejected("get", user.as_deref(), BookmarkError::NotFound(id.to_string()))),
        }
    }
}
