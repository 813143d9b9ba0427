//! `ScdText` CLI - Command-line interface for the SCR translation toolkit

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_FILE_NAME, ScdConfig};

#[derive(Parser)]
#[command(name = "scdtext")]
#[command(about = "ScdText: SCR script archive and dialogue text tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults are used when it does not exist)
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Show per-file log output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `ScdText` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ScdConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    cli.command.execute(&config)?;

    Ok(())
}
