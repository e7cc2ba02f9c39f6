//! Document CRUD operations.

use crate::database::Database;
use crate::error::{DbError, DbResult};
use chrono::{DateTime, Utc};
use rusqlite::params;
use varia_core::Document;

impl Database {
    /// Create a new document.
    pub fn create_document(&self, document: &Document) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO documents (id, title, display_name, text, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                document.id,
                document.title,
                document.display_name,
                document.text,
                document.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a document by ID.
    pub fn get_document(&self, id: &str) -> DbResult<Document> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, title, display_name, text, created_at FROM documents WHERE id = ?1",
            params![id],
            row_to_document,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound(format!("Document not found: {}", id))
            }
            _ => DbError::from(e),
        })
    }

    /// Find a document by its external identifier (title).
    pub fn find_document_by_title(&self, title: &str) -> DbResult<Option<Document>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, title, display_name, text, created_at FROM documents WHERE title = ?1",
            params![title],
            row_to_document,
        );

        match result {
            Ok(document) => Ok(Some(document)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::from(e)),
        }
    }

    /// List documents, optionally filtered by a search term matching the
    /// title or display name, ordered case-insensitively by shown name.
    pub fn list_documents(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Document>> {
        let conn = self.conn()?;
        let pattern = format!("%{}%", search.unwrap_or(""));

        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, display_name, text, created_at
            FROM documents
            WHERE title LIKE ?1 OR display_name LIKE ?1
            ORDER BY LOWER(COALESCE(display_name, title)), LOWER(title)
            LIMIT ?2 OFFSET ?3
            "#,
        )?;

        let documents = stmt.query_map(params![pattern, limit, offset], row_to_document)?;
        documents
            .collect::<Result<Vec<_>, _>>()
            .map_err(DbError::from)
    }

    /// Count documents matching a search term.
    pub fn count_documents(&self, search: Option<&str>) -> DbResult<i64> {
        let conn = self.conn()?;
        let pattern = format!("%{}%", search.unwrap_or(""));
        let count = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE title LIKE ?1 OR display_name LIKE ?1",
            params![pattern],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Set or clear a document's display name.
    pub fn set_display_name(&self, id: &str, name: Option<&str>) -> DbResult<()> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE documents SET display_name = ?2 WHERE id = ?1",
            params![id, name],
        )?;

        if rows == 0 {
            return Err(DbError::NotFound(format!("Document not found: {}", id)));
        }

        Ok(())
    }

    /// Delete a document; its lines go with it (FK cascade).
    pub fn delete_document(&self, id: &str) -> DbResult<()> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(DbError::NotFound(format!("Document not found: {}", id)));
        }

        Ok(())
    }

    /// Get a document by ID prefix.
    ///
    /// Useful for CLI where users can type partial IDs.
    pub fn get_document_by_prefix(&self, prefix: &str) -> DbResult<Document> {
        let conn = self.conn()?;

        // First try exact match
        if let Ok(document) = self.get_document(prefix) {
            return Ok(document);
        }

        let pattern = format!("{}%", prefix);
        let mut stmt = conn.prepare(
            "SELECT id, title, display_name, text, created_at
             FROM documents WHERE id LIKE ?1 LIMIT 2",
        )?;

        let documents: Vec<Document> = stmt
            .query_map(params![pattern], row_to_document)?
            .collect::<Result<Vec<_>, _>>()?;

        match documents.len() {
            0 => Err(DbError::NotFound(format!("Document not found: {}", prefix))),
            1 => Ok(documents.into_iter().next().unwrap()),
            _ => Err(DbError::Other(format!(
                "Ambiguous ID prefix '{}': multiple documents match",
                prefix
            ))),
        }
    }
}

fn row_to_document(row: &rusqlite::Row) -> rusqlite::Result<Document> {
    let created_at_str: String = row.get(4)?;

    Ok(Document {
        id: row.get(0)?,
        title: row.get(1)?,
        display_name: row.get(2)?,
        text: row.get(3)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
