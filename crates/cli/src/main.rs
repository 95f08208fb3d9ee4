//! Flight Delay Predictor CLI
//!
//! Offline model fitting with held-out evaluation, and inspection of the
//! feature vector a serving request would produce.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{encode, train};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Flight Delay Predictor CLI
#[derive(Parser)]
#[command(name = "delay-cli")]
#[command(author, version, about = "CLI for the Flight Delay Predictor", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit the classifier on historical flights and evaluate it on the held-out split
    Train {
        /// Directory containing data/data.csv
        #[arg(long, env = "REPO_ROOT", default_value = ".")]
        repo_root: PathBuf,

        /// Explicit dataset path, overrides --repo-root
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show the validation verdict and model features for one flight
    Encode {
        /// Operating airline name
        #[arg(long)]
        airline: String,

        /// Flight type code (I or N)
        #[arg(long)]
        flight_type: String,

        /// Month of year
        #[arg(long, allow_hyphen_values = true)]
        month: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train { repo_root, data } => {
            train::run(&repo_root, data.as_deref(), cli.format)?;
        }
        Commands::Encode {
            airline,
            flight_type,
            month,
        } => {
            encode::run(airline, flight_type, month, cli.format)?;
        }
    }

    Ok(())
}
