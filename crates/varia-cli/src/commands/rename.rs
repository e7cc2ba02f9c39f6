//! Rename command - set or clear a document's display name.

use super::{get_database, resolve_document};
use anyhow::Result;
use colored::Colorize;

pub fn run(reference: &str, name: Option<&str>, clear: bool) -> Result<()> {
    let db = get_database()?;
    let document = resolve_document(&db, reference)?;

    if clear {
        db.set_display_name(&document.id, None)?;
        println!(
            "{} Display name cleared for {}",
            "Renamed:".green().bold(),
            document.title
        );
        return Ok(());
    }

    let name = name.ok_or_else(|| anyhow::anyhow!("Pass a new display name, or --clear"))?;
    db.set_display_name(&document.id, Some(name))?;
    println!(
        "{} {} is now shown as {}",
        "Renamed:".green().bold(),
        document.title,
        name.white().bold()
    );

    Ok(())
}
