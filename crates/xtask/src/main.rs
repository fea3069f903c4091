//! Development tasks for the grid inventory workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, DemoSave, InspectSave, ListSaves};
use tracing::Level;

/// Development tasks for the grid inventory workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the grid inventory", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load and cross-check a content directory
    CheckContent(CheckContent),

    /// List save slots
    ListSaves(ListSaves),

    /// Read and inspect a saved session
    InspectSave(InspectSave),

    /// Build a session from content, pick up items and save it
    DemoSave(DemoSave),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for INVENTORY_DATA_DIR / INVENTORY_SAVE_DIR)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::CheckContent(cmd) => cmd.execute(),
        Command::ListSaves(cmd) => cmd.execute(),
        Command::InspectSave(cmd) => cmd.execute(),
        Command::DemoSave(cmd) => cmd.execute(),
    }
}
