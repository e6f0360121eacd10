//! Vigia CLI
//!
//! A command-line host for the community report form: locate a map click,
//! submit a report, and browse or export what has been stored.

mod commands;
mod config;
mod state_factory;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::VigiaConfig;

/// Vigia CLI: submit and browse community reports.
#[derive(Parser, Debug)]
#[command(name = "vigia", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        long,
        env = "VIGIA_CONFIG",
        default_value = "vigia.toml",
        global = true
    )]
    config: PathBuf,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a click on the map into coordinates.
    Locate(commands::locate::LocateArgs),
    /// Validate and store a new report.
    Submit(commands::submit::SubmitArgs),
    /// List stored reports.
    List,
    /// Show a single report.
    Show {
        /// Report ID.
        id: u64,
    },
    /// Export stored reports as a GeoJSON feature collection.
    Export(commands::export::ExportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VigiaConfig::load(&cli.config)?;

    match cli.command {
        Command::Locate(args) => commands::locate::run(&config, &args, &cli.format),
        Command::Submit(args) => commands::submit::run(&config, &args, &cli.format).await,
        Command::List => commands::list::run(&config, &cli.format).await,
        Command::Show { id } => commands::show::run(&config, id, &cli.format).await,
        Command::Export(args) => commands::export::run(&config, &args).await,
    }
}
