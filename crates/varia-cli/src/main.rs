//! Varia CLI - Collaborative text-alignment annotation store

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Varia - review and validate aligned transcriptions line by line
#[derive(Parser)]
#[command(name = "varia")]
#[command(version)]
#[command(about = "Collaborative text-alignment annotation store", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Varia (create config and database)
    Init,

    /// Drop all data and recreate the database schema
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Import documents from an ndjson file
    Import {
        /// Path to the ndjson file
        file: std::path::PathBuf,
    },

    /// List documents with validation progress
    Docs {
        /// Filter by title or display name
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: i64,
    },

    /// Show details of a document
    Show {
        /// Document title, ID or ID prefix
        document: String,
    },

    /// List a document's lines
    Lines {
        /// Document title, ID or ID prefix
        document: String,

        /// Filter by status (pending, validated)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Inspect or update individual lines
    #[command(subcommand)]
    Line(LineCommands),

    /// Set or clear a document's display name
    Rename {
        /// Document title, ID or ID prefix
        document: String,

        /// New display name
        name: Option<String>,

        /// Clear the display name instead
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },

    /// Export a document and its lines as JSON
    Export {
        /// Document title, ID or ID prefix
        document: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Show store statistics
    Stats,
}

#[derive(Subcommand)]
enum LineCommands {
    /// Show a line
    Show {
        /// Line ID
        id: String,
    },

    /// Apply a partial update to a line
    Update {
        /// Line ID
        id: String,

        /// New normalized reading
        #[arg(short, long)]
        normalized: Option<String>,

        /// New status (pending, validated)
        #[arg(short, long)]
        status: Option<String>,

        /// Join this line with its neighbor for display (true/false)
        #[arg(short, long)]
        merge: Option<bool>,
    },

    /// Mark a line as validated
    Validate {
        /// Line ID
        id: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("varia=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("varia=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = varia_config::Config::load().unwrap_or_default();
    if !config.ui.color {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Reset { yes } => commands::reset::run(yes),
        Commands::Import { file } => commands::import::run(&file),
        Commands::Docs { search, page } => commands::docs::run(search.as_deref(), page, &config),
        Commands::Show { document } => commands::show::run(&document, &config),
        Commands::Lines { document, status } => commands::lines::run(&document, status.as_deref()),
        Commands::Line(cmd) => match cmd {
            LineCommands::Show { id } => commands::line::show(&id),
            LineCommands::Update {
                id,
                normalized,
                status,
                merge,
            } => commands::line::update(&id, normalized, status.as_deref(), merge),
            LineCommands::Validate { id } => commands::line::validate(&id),
        },
        Commands::Rename {
            document,
            name,
            clear,
        } => commands::rename::run(&document, name.as_deref(), clear),
        Commands::Export { document, output } => {
            commands::export::run(&document, output.as_deref())
        }
        Commands::Stats => commands::stats::run(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
