//! Lines command - list a document's lines for review.

use super::{get_database, preview, resolve_document};
use anyhow::Result;
use colored::Colorize;
use varia_core::LineStatus;

pub fn run(reference: &str, status_filter: Option<&str>) -> Result<()> {
    let db = get_database()?;
    let document = resolve_document(&db, reference)?;

    let filter = match status_filter {
        Some(s) => Some(
            LineStatus::from_str(s)
                .ok_or_else(|| anyhow::anyhow!("Unknown status: {} (pending, validated)", s))?,
        ),
        None => None,
    };

    let lines = db.get_lines_by_document(&document.id)?;
    let lines: Vec<_> = lines
        .into_iter()
        .filter(|line| filter.map_or(true, |f| line.status == f))
        .collect();

    println!(
        "{} ({} line(s))",
        document.displayable_title().white().bold(),
        lines.len()
    );
    println!("{}", "─".repeat(70));

    for line in &lines {
        let status = match line.status {
            LineStatus::Validated => "validated".green(),
            LineStatus::Pending => "pending  ".yellow(),
        };
        let merge_mark = if line.merge { "+" } else { " " };

        println!(
            "  {} {:>5}..{:<5} {} {}  {}",
            line.id[..8].dimmed(),
            line.start,
            line.end(),
            status,
            merge_mark,
            preview(&line.canonical, 40),
        );
        if !line.normalized.is_empty() {
            println!("             {} {}", "→".dimmed(), preview(&line.normalized, 40).dimmed());
        }
    }

    Ok(())
}
