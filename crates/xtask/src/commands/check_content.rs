//! Validate a content directory
//!
//! Loads the layout, shape table and template catalog exactly as a session
//! would and reports what was found.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use inventory_content::ContentFactory;

use crate::dirs;

/// Load and cross-check a content directory
#[derive(Parser)]
pub struct CheckContent {
    /// Content directory (defaults to $INVENTORY_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::content_dir(self.data_dir);
        let content = ContentFactory::new(&data_dir)
            .load_all()
            .with_context(|| format!("Content check failed for {}", data_dir.display()))?;

        println!(
            "{} {}",
            style("Content Directory:").bold().cyan(),
            data_dir.display()
        );
        println!();

        println!("{}", style("Layout:").bold().yellow());
        println!("  Bag: {}", content.config.bag);
        println!("  Overflow: {}", content.config.overflow);
        for slot in &content.config.equipment {
            println!("  {}: {} accepts {:?}", slot.slot, slot.size, slot.accepts);
        }
        println!();

        println!("{}", style("Shapes:").bold().yellow());
        for id in content.shapes.ids() {
            println!(
                "  {} - {} rotation(s), bounds {}",
                id,
                content.shapes.rotation_count(id),
                content.shapes.bounds(id, 0)
            );
        }
        println!();

        let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for template in content.templates.iter() {
            *by_kind.entry(template.type_tag().to_string()).or_default() += 1;
        }
        println!("{}", style("Templates:").bold().yellow());
        println!("  Total: {}", content.templates.len());
        for (kind, count) in &by_kind {
            println!("  {}: {}", kind, count);
        }
        println!();

        // An item that fits the bag in no orientation can only ever sit in
        // the overflow.
        let bag = content.config.bag;
        let mut oversized: Vec<String> = content
            .templates
            .iter()
            .filter(|t| {
                (0..content.shapes.rotation_count(t.shape)).all(|rotation| {
                    let bounds = content.shapes.bounds(t.shape, rotation);
                    bounds.width > bag.width || bounds.height > bag.height
                })
            })
            .map(|t| t.id.to_string())
            .collect();
        oversized.sort();
        if !oversized.is_empty() {
            println!(
                "{} never fit the bag: {}",
                style("warning:").bold().yellow(),
                oversized.join(", ")
            );
        }

        println!("{}", style("✓ Content is valid").bold().green());
        Ok(())
    }
}
