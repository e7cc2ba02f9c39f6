//! Line CRUD operations.

use crate::database::Database;
use crate::error::{DbError, DbResult};
use rusqlite::{params, Transaction};
use varia_core::{Line, LinePatch, LineStatus};

const LINE_COLUMNS: &str = "id, document_id, start, canonical, normalized, status, merge";

impl Database {
    /// Create a new line.
    pub fn create_line(&self, line: &Line) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO lines (id, document_id, start, canonical, normalized, status, merge)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                line.id,
                line.document_id,
                line.start as i64,
                line.canonical,
                line.normalized,
                line.status.as_str(),
                line.merge,
            ],
        )?;
        Ok(())
    }

    /// Create multiple lines in a transaction.
    pub fn create_lines(&self, lines: &[Line]) -> DbResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO lines (id, document_id, start, canonical, normalized, status, merge)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;

            for line in lines {
                stmt.execute(params![
                    line.id,
                    line.document_id,
                    line.start as i64,
                    line.canonical,
                    line.normalized,
                    line.status.as_str(),
                    line.merge,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Get a line by ID.
    pub fn get_line(&self, id: &str) -> DbResult<Line> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM lines WHERE id = ?1", LINE_COLUMNS),
            params![id],
            row_to_line,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound(format!("Line not found: {}", id))
            }
            _ => DbError::from(e),
        })
    }

    /// Get all lines for a document, ordered by start offset.
    pub fn get_lines_by_document(&self, document_id: &str) -> DbResult<Vec<Line>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM lines WHERE document_id = ?1 ORDER BY start",
            LINE_COLUMNS
        ))?;

        let lines = stmt.query_map(params![document_id], row_to_line)?;
        lines.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Apply a partial update to a line, atomically.
    ///
    /// Only fields present in the patch are written; either the whole patch
    /// commits or nothing does. Returns the line as stored afterwards.
    pub fn update_line(&self, id: &str, patch: &LinePatch) -> DbResult<Line> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut line = get_line_tx(&tx, id)?;

        if let Some(ref normalized) = patch.normalized {
            line.normalized = normalized.clone();
        }
        if let Some(merge) = patch.merge {
            line.merge = merge;
        }
        if let Some(status) = patch.status {
            line.status = status;
        }

        tx.execute(
            "UPDATE lines SET normalized = ?2, status = ?3, merge = ?4 WHERE id = ?1",
            params![line.id, line.normalized, line.status.as_str(), line.merge],
        )?;

        tx.commit()?;
        Ok(line)
    }

    /// Count a document's lines, optionally filtered by status.
    pub fn count_lines(&self, document_id: &str, status: Option<LineStatus>) -> DbResult<i64> {
        let conn = self.conn()?;
        let count = match status {
            Some(status) => conn.query_row(
                "SELECT COUNT(*) FROM lines WHERE document_id = ?1 AND status = ?2",
                params![document_id, status.as_str()],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT COUNT(*) FROM lines WHERE document_id = ?1",
                params![document_id],
                |row| row.get(0),
            )?,
        };
        Ok(count)
    }
}

fn get_line_tx(tx: &Transaction, id: &str) -> DbResult<Line> {
    tx.query_row(
        &format!("SELECT {} FROM lines WHERE id = ?1", LINE_COLUMNS),
        params![id],
        row_to_line,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Line not found: {}", id)),
        _ => DbError::from(e),
    })
}

fn row_to_line(row: &rusqlite::Row) -> rusqlite::Result<Line> {
    let start: i64 = row.get(2)?;
    let status_str: String = row.get(5)?;

    Ok(Line {
        id: row.get(0)?,
        document_id: row.get(1)?,
        start: start as usize,
        canonical: row.get(3)?,
        normalized: row.get(4)?,
        status: LineStatus::from_str(&status_str).unwrap_or_default(),
        merge: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use varia_core::Document;

    fn document_with_db() -> (Database, Document) {
        let db = Database::open_in_memory().unwrap();
        let doc = Document::new("ms-test", "AB gap CD");
        db.create_document(&doc).unwrap();
        (db, doc)
    }

    #[test]
    fn test_line_crud() {
        let (db, doc) = document_with_db();

        let line1 = Line::new(doc.id.clone(), 0, "AB", "ab");
        let line2 = Line::new(doc.id.clone(), 2, " gap ", "");
        // Insert out of order; reads come back ordered by start
        db.create_line(&line2).unwrap();
        db.create_line(&line1).unwrap();

        let lines = db.get_lines_by_document(&doc.id).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].canonical, "AB");
        assert_eq!(lines[1].start, 2);
        assert!(lines[1].is_uncovered());

        let fetched = db.get_line(&line1.id).unwrap();
        assert_eq!(fetched.normalized, "ab");
        assert_eq!(fetched.status, LineStatus::Pending);
    }

    #[test]
    fn test_create_lines_batch() {
        let (db, doc) = document_with_db();

        let lines = vec![
            Line::new(doc.id.clone(), 0, "AB", "ab"),
            Line::new(doc.id.clone(), 2, " gap ", ""),
            Line::new(doc.id.clone(), 7, "CD", "cd"),
        ];
        db.create_lines(&lines).unwrap();

        assert_eq!(db.count_lines(&doc.id, None).unwrap(), 3);
    }

    #[test]
    fn test_partial_update_preserves_untouched_fields() {
        let (db, doc) = document_with_db();

        let line = Line::new(doc.id.clone(), 0, "AB", "ab");
        db.create_line(&line).unwrap();

        let patch = LinePatch {
            status: Some(LineStatus::Validated),
            ..Default::default()
        };
        let updated = db.update_line(&line.id, &patch).unwrap();

        assert_eq!(updated.status, LineStatus::Validated);
        assert_eq!(updated.normalized, "ab");
        assert!(!updated.merge);

        // And again from a fresh read
        let fetched = db.get_line(&line.id).unwrap();
        assert_eq!(fetched.status, LineStatus::Validated);
        assert_eq!(fetched.normalized, "ab");
    }

    #[test]
    fn test_update_all_fields() {
        let (db, doc) = document_with_db();

        let line = Line::new(doc.id.clone(), 0, "AB", "ab");
        db.create_line(&line).unwrap();

        let patch = LinePatch {
            normalized: Some("a b".to_string()),
            merge: Some(true),
            status: Some(LineStatus::Validated),
        };
        let updated = db.update_line(&line.id, &patch).unwrap();

        assert_eq!(updated.normalized, "a b");
        assert!(updated.merge);
        assert_eq!(updated.status, LineStatus::Validated);
    }

    #[test]
    fn test_update_missing_line() {
        let (db, _doc) = document_with_db();

        let patch = LinePatch {
            merge: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            db.update_line("no-such-line", &patch),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_count_lines_by_status() {
        let (db, doc) = document_with_db();

        let line1 = Line::new(doc.id.clone(), 0, "AB", "ab");
        let line2 = Line::new(doc.id.clone(), 2, "CD", "cd");
        db.create_line(&line1).unwrap();
        db.create_line(&line2).unwrap();

        db.update_line(
            &line1.id,
            &LinePatch {
                status: Some(LineStatus::Validated),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(db.count_lines(&doc.id, None).unwrap(), 2);
        assert_eq!(
            db.count_lines(&doc.id, Some(LineStatus::Validated)).unwrap(),
            1
        );
        assert_eq!(
            db.count_lines(&doc.id, Some(LineStatus::Pending)).unwrap(),
            1
        );
    }

    #[test]
    fn test_cascade_delete() {
        let (db, doc) = document_with_db();

        db.create_line(&Line::new(doc.id.clone(), 0, "AB", "ab"))
            .unwrap();
        db.delete_document(&doc.id).unwrap();

        assert_eq!(db.count_lines(&doc.id, None).unwrap(), 0);
    }
}
