//! Initialize Varia.

use super::{database_path, get_paths};
use anyhow::{Context, Result};
use colored::Colorize;
use varia_config::Config;
use varia_db::Database;

pub fn run() -> Result<()> {
    let paths = get_paths()?;

    // Check if already initialized
    if paths.is_initialized() {
        println!("{} Varia is already initialized.", "Note:".yellow().bold());
        println!("  Config: {}", paths.config_file.display());
        println!("  Database: {}", paths.database_file.display());
        return Ok(());
    }

    println!("{}", "Initializing Varia...".cyan().bold());

    // Create directories
    paths.ensure_dirs().context("Failed to create directories")?;
    println!("  {} Created directories", "✓".green());

    // Create config file
    Config::create_default_file(&paths.config_file).context("Failed to create config file")?;
    println!(
        "  {} Created config: {}",
        "✓".green(),
        paths.config_file.display()
    );

    // Initialize database
    let db_path = database_path()?;
    let _db = Database::open(&db_path).context("Failed to initialize database")?;
    println!("  {} Created database: {}", "✓".green(), db_path.display());

    println!();
    println!("{}", "Varia initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Import documents: {}", "varia import alignments.jsonl".cyan());
    println!("  2. Browse them: {}", "varia docs".cyan());
    println!("  3. Review lines: {}", "varia lines <document>".cyan());

    Ok(())
}
