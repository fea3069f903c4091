//! Inspect a saved session
//!
//! Accepts either a save slot name or a path to an exported `.json` or `.bin`
//! snapshot. The grid view restores the snapshot into a fresh session built
//! from content, so it also checks that the save still loads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use console::style;
use inventory_content::ContentFactory;
use inventory_runtime::{
    EventBus, FileSessionRepository, InventorySession, SessionRepository, SessionSnapshot,
};

use crate::{dirs, render};

/// Read and inspect a saved session
#[derive(Parser)]
pub struct InspectSave {
    /// Save slot name, or path to a .json/.bin snapshot
    save: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Save directory (defaults to $INVENTORY_SAVE_DIR or the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Content directory used by the grid view
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Per-container counts and grid digests
    Summary,
    /// The snapshot as pretty JSON
    Json,
    /// Restore and draw each container
    Grid,
}

impl InspectSave {
    pub fn execute(self) -> Result<()> {
        let snapshot = self.read_snapshot()?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                Ok(())
            }
            OutputFormat::Summary => {
                print_summary(&self.save, &snapshot);
                Ok(())
            }
            OutputFormat::Grid => self.print_grids(&snapshot),
        }
    }

    fn read_snapshot(&self) -> Result<SessionSnapshot> {
        let path = Path::new(&self.save);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                SessionSnapshot::from_json(&json)
                    .with_context(|| format!("Failed to parse {}", path.display()))
            }
            Some("bin") => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                SessionSnapshot::from_bytes(&bytes)
                    .with_context(|| format!("Failed to decode {}", path.display()))
            }
            _ => {
                let save_dir = dirs::save_dir(self.save_dir.clone());
                let repo = FileSessionRepository::new(&save_dir)?;
                match repo.load(&self.save)? {
                    Some(snapshot) => Ok(snapshot),
                    None => bail!("No save named '{}' in {}", self.save, save_dir.display()),
                }
            }
        }
    }

    fn print_grids(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let data_dir = dirs::content_dir(self.data_dir.clone());
        let content = ContentFactory::new(&data_dir).load_all()?;
        let mut session = InventorySession::from_content(&content, EventBus::new());
        session
            .load(snapshot)
            .context("Save does not load against this content")?;

        for (id, inventory) in session.containers() {
            println!(
                "{} {} ({}) digest {}",
                style("Container:").bold().cyan(),
                id,
                inventory.size(),
                hex::encode(inventory.grid().digest())
            );
            let (rows, legend) = render::grid(inventory);
            for row in rows {
                println!("  {}", row);
            }
            for (glyph, line) in legend {
                println!("  {} {}", style(glyph).bold(), line);
            }
            println!();
        }
        Ok(())
    }
}

fn print_summary(name: &str, snapshot: &SessionSnapshot) {
    println!("{} {}", style("Save:").bold().cyan(), name);
    println!("Format version: {}", snapshot.format_version);
    println!("Items: {}", snapshot.item_count());
    println!();

    for container in &snapshot.containers {
        println!(
            "{} {} ({}, next record {})",
            style("Container:").bold().yellow(),
            container.container,
            container.inventory.size,
            container.inventory.next_record_id
        );
        for record in &container.inventory.records {
            println!(
                "  {} {} at {} rot {} x{}",
                record.id,
                record.instance.template_id,
                record.position,
                record.rotation,
                record.stack_count
            );
        }
    }
}
