//! loadbus - shared loading-indicator coordination
//!
//! CLI entry point for the demo binary.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use eyre::{Context, Result};
use tracing::info;

use loadbus::cli::{Cli, Command};
use loadbus::config::Config;
use loadbus::tui;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loadbus")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout/stderr - the TUI owns the screen
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("loadbus.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        sweep_interval_ms = config.sweep.interval_ms,
        min_visible_ms = config.fetch.min_visible_ms,
        "loadbus loaded config"
    );

    match cli.command {
        Some(Command::Demo { url, count }) => tui::run_demo(&config, url, count).await,
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
