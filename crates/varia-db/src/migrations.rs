//! Database migrations and schema management.

use crate::error::DbResult;
use rusqlite::Connection;
use tracing::info;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> DbResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating initial database schema...");
        create_initial_schema(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database from version {} to {}",
            current_version, SCHEMA_VERSION
        );
        run_migrations(conn, current_version)?;
    }

    Ok(())
}

fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> DbResult<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

fn create_initial_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- Imported documents; title is the external identifier and the
        -- uniqueness constraint makes concurrent duplicate imports fail
        -- at the storage layer rather than racing the existence check.
        CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            display_name TEXT,
            text TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_display ON documents(display_name);

        -- Segmented lines, owned by their document
        CREATE TABLE IF NOT EXISTS lines (
            id TEXT PRIMARY KEY,
            document_id TEXT NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            start INTEGER NOT NULL,
            canonical TEXT NOT NULL,
            normalized TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'pending',
            merge INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_lines_document ON lines(document_id);
        CREATE INDEX IF NOT EXISTS idx_lines_status ON lines(status);

        PRAGMA foreign_keys = ON;
        "#,
    )?;

    Ok(())
}

fn run_migrations(conn: &Connection, from_version: i32) -> DbResult<()> {
    // Future migrations go here
    let _ = (conn, from_version);

    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Drop all tables.
pub fn drop_all_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS lines;
        DROP TABLE IF EXISTS documents;
        "#,
    )?;
    set_schema_version(conn, 0)?;
    Ok(())
}
