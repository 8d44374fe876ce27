use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted bookmark: a named position on one page of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub document_id: Uuid,
    pub name: String,
    pub created_by: String,
    pub page_number: i32,
    pub x_coordinate: f64,
    pub y_coordinate: f64,
    pub created_at: i64,
    pub last_modified_by: Option<String>,
    pub updated_at: i64,
}

/// A bookmark record as submitted by a caller.
///
/// Every field is optional so that missing values surface as validation
/// errors instead of deserialization failures. Audit fields are owned by the
/// service and are not accepted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkInput {
    pub id: Option<Uuid>,
    pub document_id: Option<Uuid>,
    pub name: Option<String>,
    pub created_by: Option<String>,
    pub page_number: Option<i32>,
    pub x_coordinate: Option<f64>,
    pub y_coordinate: Option<f64>,
}

impl From<&Bookmark> for BookmarkInput {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            id: Some(bookmark.id),
            document_id: Some(bookmark.document_id),
            name: Some(bookmark.name.clone()),
            created_by: Some(bookmark.created_by.clone()),
            page_number: Some(bookmark.page_number),
            x_coordinate: Some(bookmark.x_coordinate),
            y_coordinate: Some(bookmark.y_coordinate),
        }
    }
}
