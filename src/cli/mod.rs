//! bzscan CLI - command-line interface for the mod validation tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "bzscan")]
#[command(version)]
#[command(about = "bzscan: Workshop content validation for Battlezone 98 Redux mods", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the bzscan CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
