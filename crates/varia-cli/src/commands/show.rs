//! Show command - display document details.

use super::{get_database, preview, resolve_document};
use anyhow::Result;
use colored::Colorize;
use varia_config::Config;
use varia_core::LineStatus;

pub fn run(reference: &str, config: &Config) -> Result<()> {
    let db = get_database()?;
    let document = resolve_document(&db, reference)?;

    let total = db.count_lines(&document.id, None)?;
    let validated = db.count_lines(&document.id, Some(LineStatus::Validated))?;
    let pct = db.validation_percentage(&document.id)?;

    println!("{}", document.displayable_title().white().bold());
    println!("{}", "─".repeat(70));

    println!("  {}: {}", "ID".cyan(), document.id);
    println!("  {}: {}", "Title".cyan(), document.title);
    if let Some(ref name) = document.display_name {
        println!("  {}: {}", "Display name".cyan(), name);
    }
    println!(
        "  {}: {}",
        "Imported".cyan(),
        document.created_at.format(&config.ui.date_format)
    );
    println!(
        "  {}: {} characters",
        "Text".cyan(),
        document.text.chars().count()
    );
    println!(
        "  {}: {} total, {} validated ({:.1}%)",
        "Lines".cyan(),
        total,
        validated,
        pct
    );

    if !document.text.is_empty() {
        println!();
        println!("{}", "Text Preview".white().bold());
        println!("{}", "─".repeat(70));
        println!("{}", preview(&document.text, 200).dimmed());
    }

    Ok(())
}
