//! Bookmark Store for Docmark.
//!
//! Implements `BookmarkStore` — keyed persistence for bookmarks with a
//! secondary lookup by document, backed by SQLite via `rusqlite`.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

const SELECT_COLUMNS: &str = "SELECT id, document_id, name, created_by, page_number, \
     x_coordinate, y_coordinate, created_at, last_modified_by, updated_at FROM bookmarks";

/// Trait defining bookmark persistence operations.
pub trait BookmarkStore {
    /// Inserts a new record or replaces the record with the same id.
    fn save(&self, bookmark: &Bookmark) -> Result<Bookmark, BookmarkError>;
    fn find_by_id(&self, id: &Uuid) -> Result<Option<Bookmark>, BookmarkError>;
    fn find_all(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    /// All bookmarks of a document, regardless of owner.
    fn find_by_document_id(&self, document_id: &Uuid) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Removes the record if present. Returns whether a row was removed.
    fn delete_by_id(&self, id: &Uuid) -> Result<bool, BookmarkError>;
    fn count(&self) -> Result<usize, BookmarkError>;

    /// Runs `f` in a single transactional scope.
    ///
    /// Commits when `f` returns `Ok`; any error or unwind rolls back.
    fn in_transaction<T, F>(&self, f: F) -> Result<T, BookmarkError>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, BookmarkError>;
}

/// Bookmark store backed by a SQLite connection.
pub struct SqliteBookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteBookmarkStore<'a> {
    /// Creates a new `SqliteBookmarkStore` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_uuid(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Uuid> {
        let raw: String = row.get(idx)?;
        Uuid::parse_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: Self::parse_uuid(row, 0)?,
            document_id: Self::parse_uuid(row, 1)?,
            name: row.get(2)?,
            created_by: row.get(3)?,
            page_number: row.get(4)?,
            x_coordinate: row.get(5)?,
            y_coordinate: row.get(6)?,
            created_at: row.get(7)?,
            last_modified_by: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn query_list(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}

impl<'a> BookmarkStore for SqliteBookmarkStore<'a> {
    /// Upserts by id.
    ///
    /// A stored row with the same id but a different document or owner is a
    /// constraint violation and is never overwritten.
    fn save(&self, bookmark: &Bookmark) -> Result<Bookmark, BookmarkError> {
        if let Some(existing) = self.find_by_id(&bookmark.id)? {
            if existing.document_id != bookmark.document_id
                || existing.created_by != bookmark.created_by
            {
                return Err(BookmarkError::Persistence(format!(
                    "bookmark {} already exists for a different document or owner",
                    bookmark.id
                )));
            }
        }

        self.conn.execute(
            "INSERT INTO bookmarks (id, document_id, name, created_by, page_number, x_coordinate, \
             y_coordinate, created_at, last_modified_by, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
             ON CONFLICT(id) DO UPDATE SET \
                 name = excluded.name, \
                 page_number = excluded.page_number, \
                 x_coordinate = excluded.x_coordinate, \
                 y_coordinate = excluded.y_coordinate, \
                 last_modified_by = excluded.last_modified_by, \
                 updated_at = excluded.updated_at",
            params![
                bookmark.id.to_string(),
                bookmark.document_id.to_string(),
                bookmark.name,
                bookmark.created_by,
                bookmark.page_number,
                bookmark.x_coordinate,
                bookmark.y_coordinate,
                bookmark.created_at,
                bookmark.last_modified_by,
                bookmark.updated_at,
            ],
        )?;

        debug!(subsystem = "store", op = "save", bookmark_id = %bookmark.id, "Bookmark row written");

        self.find_by_id(&bookmark.id)?.ok_or_else(|| {
            BookmarkError::Persistence(format!("bookmark {} missing after save", bookmark.id))
        })
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<Bookmark>, BookmarkError> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let found = self
            .conn
            .query_row(&sql, params![id.to_string()], Self::row_to_bookmark)
            .optional()?;
        Ok(found)
    }

    fn find_all(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let sql = format!("{} ORDER BY created_at, rowid", SELECT_COLUMNS);
        self.query_list(&sql, &[])
    }

    fn find_by_document_id(&self, document_id: &Uuid) -> Result<Vec<Bookmark>, BookmarkError> {
        let sql = format!("{} WHERE document_id = ?1 ORDER BY created_at, rowid", SELECT_COLUMNS);
        let document_id = document_id.to_string();
        self.query_list(&sql, &[&document_id as &dyn rusqlite::ToSql])
    }

    fn delete_by_id(&self, id: &Uuid) -> Result<bool, BookmarkError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    fn count(&self) -> Result<usize, BookmarkError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn in_transaction<T, F>(&self, f: F) -> Result<T, BookmarkError>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, BookmarkError>,
    {
        // Statements issued through `self.conn` join the open transaction.
        // `tx` rolls back when dropped uncommitted, on error or on unwind.
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }
}
