//! Docs command - list documents with validation progress.

use super::get_database;
use anyhow::Result;
use colored::Colorize;
use varia_config::Config;

pub fn run(search: Option<&str>, page: i64, config: &Config) -> Result<()> {
    let db = get_database()?;

    let page = page.max(1);
    let per_page = config.ui.page_size.max(1);
    let offset = (page - 1) * per_page;

    let total = db.count_documents(search)?;
    let documents = db.list_documents(search, per_page, offset)?;

    if documents.is_empty() {
        match search {
            Some(term) => println!("No documents match '{}'.", term),
            None => println!("No documents yet. Import some with {}.", "varia import".cyan()),
        }
        return Ok(());
    }

    println!("{}", "Documents".cyan().bold());
    println!("{}", "─".repeat(70));

    for document in &documents {
        let lines = db.count_lines(&document.id, None)?;
        let pct = db.validation_percentage(&document.id)?;

        let pct_str = format!("{:5.1}%", pct);
        let pct_str = if pct >= 100.0 {
            pct_str.green()
        } else if pct > 0.0 {
            pct_str.yellow()
        } else {
            pct_str.dimmed()
        };

        println!(
            "  {}  {}  {:4} lines  {}",
            document.id[..8].dimmed(),
            pct_str,
            lines,
            document.displayable_title().white().bold(),
        );
    }

    let pages = (total + per_page - 1) / per_page;
    println!("{}", "─".repeat(70));
    println!("  Page {} of {} ({} document(s))", page, pages.max(1), total);

    Ok(())
}
