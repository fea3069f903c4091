//! Create a demonstration save from content.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use inventory_content::ContentFactory;
use inventory_core::{EquipmentSlot, TemplateId};
use inventory_runtime::{EventBus, FileSessionRepository, InventorySession, SessionRepository};

use crate::dirs;

/// Build a session from content, pick up items and save it
#[derive(Parser)]
pub struct DemoSave {
    /// Save slot name
    #[arg(default_value = "demo")]
    name: String,

    /// Templates to pick up, in order
    #[arg(short, long = "item", value_name = "TEMPLATE", num_args = 1..)]
    items: Vec<String>,

    /// Equip the first picked-up item that a slot accepts
    #[arg(long, value_name = "SLOT", value_parser = parse_slot)]
    equip: Option<EquipmentSlot>,

    /// Content directory (defaults to $INVENTORY_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Save directory (defaults to $INVENTORY_SAVE_DIR or the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

fn parse_slot(value: &str) -> Result<EquipmentSlot, String> {
    value
        .parse()
        .map_err(|_| format!("unknown equipment slot '{}'", value))
}

const DEFAULT_ITEMS: &[&str] = &["rifle", "rifle_ammo", "medkit", "ration", "crowbar"];

impl DemoSave {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::content_dir(self.data_dir);
        let content = ContentFactory::new(&data_dir).load_all()?;
        let mut session = InventorySession::from_content(&content, EventBus::new());

        let items: Vec<TemplateId> = if self.items.is_empty() {
            DEFAULT_ITEMS.iter().map(|id| TemplateId::from(*id)).collect()
        } else {
            self.items.into_iter().map(TemplateId::from).collect()
        };

        let mut picked = Vec::new();
        for template in &items {
            match session.pickup(template) {
                Ok((container, record)) => {
                    println!("  picked up {} into {} as {}", template, container, record);
                    picked.push((container, record));
                }
                Err(error) => println!("  {} {}: {}", style("skipped").yellow(), template, error),
            }
        }

        if let Some(slot) = self.equip {
            let equipped = picked
                .iter()
                .find_map(|(container, record)| session.equip(*container, *record, slot).ok());
            match equipped {
                Some(record) => println!("  equipped {} in {}", record, slot),
                None => println!("  {} nothing fits {}", style("skipped").yellow(), slot),
            }
        }

        let save_dir = dirs::save_dir(self.save_dir);
        let repo = FileSessionRepository::new(&save_dir)?;
        let snapshot = session.save()?;
        repo.save(&self.name, &snapshot)
            .with_context(|| format!("Failed to write save '{}'", self.name))?;

        println!(
            "{} '{}' with {} item(s) in {}",
            style("✓ Saved").bold().green(),
            self.name,
            snapshot.item_count(),
            save_dir.display()
        );
        Ok(())
    }
}
