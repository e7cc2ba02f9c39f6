//! Reset command - drop all data and recreate the schema.

use super::get_database;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

pub fn run(yes: bool) -> Result<()> {
    let db = get_database()?;

    if !yes {
        print!(
            "{} This deletes every document and line. Type 'yes' to continue: ",
            "Warning:".red().bold()
        );
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if answer.trim() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    db.reset()?;
    println!("{}", "Database recreated.".green().bold());

    Ok(())
}
