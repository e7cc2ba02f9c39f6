//! Export command - serialize a document and its lines as JSON.

use super::{get_database, resolve_document};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use varia_core::DocumentExport;

pub fn run(reference: &str, output: Option<&Path>) -> Result<()> {
    let db = get_database()?;
    let document = resolve_document(&db, reference)?;
    let lines = db.get_lines_by_document(&document.id)?;

    let export = DocumentExport::new(&document, &lines);
    let json = serde_json::to_string_pretty(&export)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {} ({} line(s)) to {}",
                "Exported:".green().bold(),
                document.title,
                export.lines.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
