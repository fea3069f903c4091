//! List save slots in the save directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use inventory_runtime::{FileSessionRepository, SessionRepository};

use crate::dirs;

/// List save slots
#[derive(Parser)]
pub struct ListSaves {
    /// Save directory (defaults to $INVENTORY_SAVE_DIR or the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

impl ListSaves {
    pub fn execute(self) -> Result<()> {
        let save_dir = dirs::save_dir(self.save_dir);
        let repo = FileSessionRepository::new(&save_dir)
            .with_context(|| format!("Failed to open save directory {}", save_dir.display()))?;
        let names = repo.list().context("Failed to list saves")?;

        println!(
            "{} {}",
            style("Save Directory:").bold().cyan(),
            save_dir.display()
        );

        if names.is_empty() {
            println!("{}", style("No saves found").yellow());
            return Ok(());
        }

        for name in names {
            match repo.load(&name) {
                Ok(Some(snapshot)) => println!(
                    "  {} - {} item(s) in {} container(s)",
                    style(&name).bold(),
                    snapshot.item_count(),
                    snapshot.containers.len()
                ),
                Ok(None) => {}
                Err(error) => println!("  {} - {}", style(&name).bold(), style(error).red()),
            }
        }

        Ok(())
    }
}
