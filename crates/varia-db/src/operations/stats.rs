//! Statistics and derived-value operations.

use crate::database::Database;
use crate::error::DbResult;
use rusqlite::params;
use varia_core::{LineStatus, StoreStats};

impl Database {
    /// Share of a document's lines that reviewers have validated, as a
    /// percentage rounded to one decimal. A document with no lines is 0.0.
    pub fn validation_percentage(&self, document_id: &str) -> DbResult<f64> {
        let total = self.count_lines(document_id, None)?;
        if total == 0 {
            return Ok(0.0);
        }

        let validated = self.count_lines(document_id, Some(LineStatus::Validated))?;
        let pct = validated as f64 / total as f64 * 100.0;
        Ok((pct * 10.0).round() / 10.0)
    }

    /// Get store-wide statistics.
    pub fn get_stats(&self) -> DbResult<StoreStats> {
        let conn = self.conn()?;

        let total_documents: i64 =
            conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;

        let total_lines: i64 =
            conn.query_row("SELECT COUNT(*) FROM lines", [], |row| row.get(0))?;

        let pending_lines: i64 = conn.query_row(
            "SELECT COUNT(*) FROM lines WHERE status = ?1",
            params![LineStatus::Pending.as_str()],
            |row| row.get(0),
        )?;

        let validated_lines: i64 = conn.query_row(
            "SELECT COUNT(*) FROM lines WHERE status = ?1",
            params![LineStatus::Validated.as_str()],
            |row| row.get(0),
        )?;

        let uncovered_lines: i64 = conn.query_row(
            "SELECT COUNT(*) FROM lines WHERE normalized = ''",
            [],
            |row| row.get(0),
        )?;

        // Database size (page_count * page_size)
        let page_count: i64 = conn.pragma_query_value(None, "page_count", |row| row.get(0))?;
        let page_size: i64 = conn.pragma_query_value(None, "page_size", |row| row.get(0))?;
        let database_size_bytes = page_count * page_size;

        Ok(StoreStats {
            total_documents,
            total_lines,
            pending_lines,
            validated_lines,
            uncovered_lines,
            database_size_bytes,
        })
    }
}
