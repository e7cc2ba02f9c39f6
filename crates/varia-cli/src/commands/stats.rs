//! Stats command - show store statistics.

use super::{format_size, get_database};
use anyhow::Result;
use colored::Colorize;

pub fn run() -> Result<()> {
    let db = get_database()?;
    let stats = db.get_stats()?;

    println!("{}", "Varia Statistics".cyan().bold());
    println!("{}", "─".repeat(50));

    println!();
    println!("{}", "Documents".white().bold());
    println!("  Total: {}", stats.total_documents.to_string().green());

    println!();
    println!("{}", "Lines".white().bold());
    println!("  Total: {}", stats.total_lines);
    println!("  Pending: {}", stats.pending_lines.to_string().yellow());
    println!("  Validated: {}", stats.validated_lines.to_string().green());
    println!("  Uncovered: {}", stats.uncovered_lines);

    println!();
    println!("{}", "Storage".white().bold());
    println!("  Database size: {}", format_size(stats.database_size_bytes));
    let ok = db.integrity_check()?;
    println!(
        "  Integrity: {}",
        if ok { "ok".green() } else { "FAILED".red().bold() }
    );

    Ok(())
}
