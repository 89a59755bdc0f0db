//! Sieve CLI
//!
//! Runs filters and rule sets over JSON documents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Sieve - data filtering and sanitization
#[derive(Parser)]
#[command(name = "sieve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a filter chain to a single value
    Apply {
        /// Filter chain, e.g. "trim|substr:0,2"
        chain: String,

        /// Input value
        value: String,
    },

    /// Apply a rule set to a JSON document
    Run {
        /// Rule set file (YAML)
        #[arg(short, long)]
        rules: String,

        /// Input JSON document (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Check a rule set for unknown filters
    Validate {
        /// Rule set file (YAML)
        #[arg(short, long)]
        rules: String,
    },

    /// List built-in filters and aliases
    Filters,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Apply { chain, value } => {
            commands::apply::run(&chain, &value)?;
        }
        Commands::Run {
            rules,
            input,
            pretty,
        } => {
            commands::run::run(&rules, input.as_deref(), pretty)?;
        }
        Commands::Validate { rules } => {
            commands::validate::run(&rules)?;
        }
        Commands::Filters => {
            commands::filters::run();
        }
    }

    Ok(())
}
