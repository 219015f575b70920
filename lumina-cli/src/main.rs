//! Lumina CLI - paginate and page through plain-text books from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lumina_core::reader::{validate_budget, DEFAULT_PAGE_CHAR_BUDGET};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse and validate a page character budget (must be at least 1)
fn parse_budget(s: &str) -> Result<i64, String> {
    let n: i64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    validate_budget(n).map_err(|e| e.to_string())?;
    Ok(n)
}

#[derive(Parser)]
#[command(name = "lumina")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a text book into pages and print them
    Paginate {
        /// Input file path (.txt or .md)
        input: String,

        /// Characters per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_CHAR_BUDGET, value_parser = parse_budget)]
        budget: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Turn forward through a book and print the spread you land on
    Spread {
        /// Input file path (.txt or .md)
        input: String,

        /// Characters per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_CHAR_BUDGET, value_parser = parse_budget)]
        budget: i64,

        /// Number of spreads to turn forward
        #[arg(short, long, default_value = "0")]
        spread: usize,
    },

    /// Display pagination statistics for a text book
    Info {
        /// Input file path (.txt or .md)
        input: String,

        /// Characters per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_CHAR_BUDGET, value_parser = parse_budget)]
        budget: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List publishers or a publisher's catalog
    Catalog {
        /// Publisher key (lumina, blueleaf, sunstone)
        #[arg(short, long)]
        publisher: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Paginate every text book in a directory
    Batch {
        /// Input directory
        input_dir: String,

        /// Characters per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_CHAR_BUDGET, value_parser = parse_budget)]
        budget: i64,

        /// Number of parallel jobs (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "lumina_cli=debug,lumina_core=debug"
    } else {
        "lumina_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Paginate {
            input,
            budget,
            json,
        } => commands::paginate(&input, budget, json),

        Commands::Spread {
            input,
            budget,
            spread,
        } => commands::spread(&input, budget, spread),

        Commands::Info {
            input,
            budget,
            json,
        } => commands::info(&input, budget, json),

        Commands::Catalog { publisher, json } => commands::catalog(publisher.as_deref(), json),

        Commands::Batch {
            input_dir,
            budget,
            jobs,
        } => commands::batch(&input_dir, budget, jobs),
    }
}
