//! CLI command implementations.

pub mod docs;
pub mod export;
pub mod import;
pub mod init;
pub mod line;
pub mod lines;
pub mod rename;
pub mod reset;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use std::path::PathBuf;
use varia_config::{AppPaths, Config};
use varia_core::Document;
use varia_db::Database;

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// Where the database lives, honoring the config override.
pub fn database_path() -> Result<PathBuf> {
    let paths = get_paths()?;
    let config = Config::load().unwrap_or_default();

    Ok(match config.general.data_dir {
        Some(dir) => PathBuf::from(dir).join("varia.db"),
        None => paths.database_file,
    })
}

/// Get a database connection, ensuring varia is initialized.
pub fn get_database() -> Result<Database> {
    let paths = get_paths()?;

    if !paths.config_file.exists() {
        anyhow::bail!("Varia is not initialized. Run 'varia init' first.");
    }

    Database::open(database_path()?).context("Failed to open database")
}

/// Resolve a document from a title, full ID or ID prefix.
pub fn resolve_document(db: &Database, reference: &str) -> Result<Document> {
    if let Some(document) = db.find_document_by_title(reference)? {
        return Ok(document);
    }
    db.get_document_by_prefix(reference)
        .with_context(|| format!("No document matches '{}'", reference))
}

/// Format a file size in human-readable form.
pub fn format_size(bytes: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Truncate text to `max` characters for single-line display.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        let long = "æ".repeat(20);
        let cut = preview(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }
}
