//! Import command - stream ndjson records into the store.

use super::get_database;
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use varia_core::{Emphasis, ImportEvent, Severity};
use varia_import::Importer;

pub fn run(file: &Path) -> Result<()> {
    let db = get_database()?;
    let importer = Importer::new(db);

    let stream = importer
        .import_path(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Importing {}", file.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut created = 0u64;
    let mut skipped = 0u64;
    let mut lines = 0u64;
    let mut errors = 0u64;

    for result in stream {
        match result {
            Ok(event) => {
                match (event.severity, event.emphasis) {
                    (Severity::Success, Emphasis::Strong) => {
                        created += 1;
                        pb.set_message(event.message.clone());
                    }
                    (Severity::Warning, Emphasis::Strong) => skipped += 1,
                    (Severity::Info, _) | (Severity::Warning, _) => lines += 1,
                    (Severity::Success, Emphasis::None) => {}
                }
                pb.println(render_event(&event).to_string());
            }
            Err(e) => {
                errors += 1;
                pb.println(format!("{} {}", "Error:".red().bold(), e));
            }
        }
    }

    pb.finish_and_clear();

    println!();
    println!(
        "{} {} document(s) imported, {} line(s), {} skipped, {} error(s)",
        "Done:".green().bold(),
        created,
        lines,
        skipped,
        errors
    );

    Ok(())
}

fn render_event(event: &ImportEvent) -> ColoredString {
    let styled = match event.severity {
        Severity::Info => event.message.normal(),
        Severity::Warning => event.message.yellow(),
        Severity::Success => event.message.green(),
    };

    match event.emphasis {
        Emphasis::Strong => styled.bold(),
        Emphasis::None => styled,
    }
}
