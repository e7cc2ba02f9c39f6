//! Line commands - inspect and update individual lines.

use super::{get_database, preview};
use anyhow::Result;
use colored::Colorize;
use varia_core::{Line, LinePatch, LineStatus};

pub fn show(id: &str) -> Result<()> {
    let db = get_database()?;
    let line = db.get_line(id)?;
    print_line(&line);
    Ok(())
}

pub fn update(
    id: &str,
    normalized: Option<String>,
    status: Option<&str>,
    merge: Option<bool>,
) -> Result<()> {
    let status = match status {
        Some(s) => Some(
            LineStatus::from_str(s)
                .ok_or_else(|| anyhow::anyhow!("Unknown status: {} (pending, validated)", s))?,
        ),
        None => None,
    };

    let patch = LinePatch {
        normalized,
        merge,
        status,
    };

    if patch.is_empty() {
        anyhow::bail!("Nothing to update: pass --normalized, --status or --merge");
    }

    let db = get_database()?;
    let line = db.update_line(id, &patch)?;

    println!("{}", "Line updated.".green().bold());
    print_line(&line);
    Ok(())
}

pub fn validate(id: &str) -> Result<()> {
    let patch = LinePatch {
        status: Some(LineStatus::Validated),
        ..Default::default()
    };

    let db = get_database()?;
    let line = db.update_line(id, &patch)?;

    println!("{}", "Line validated.".green().bold());
    print_line(&line);
    Ok(())
}

fn print_line(line: &Line) {
    println!("  {}: {}", "ID".cyan(), line.id);
    println!("  {}: {}", "Document".cyan(), line.document_id);
    println!("  {}: {}..{}", "Range".cyan(), line.start, line.end());
    println!("  {}: {}", "Canonical".cyan(), preview(&line.canonical, 60));
    if line.is_uncovered() {
        println!("  {}: {}", "Normalized".cyan(), "(uncovered)".dimmed());
    } else {
        println!("  {}: {}", "Normalized".cyan(), preview(&line.normalized, 60));
    }
    println!("  {}: {}", "Status".cyan(), line.status);
    println!("  {}: {}", "Merge".cyan(), line.merge);
}
