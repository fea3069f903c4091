//! Inventory layout loader.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::bail;
use inventory_core::{GridSize, InventoryConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for the inventory layout from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing InventoryConfig
    pub fn load(path: &Path) -> LoadResult<InventoryConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<InventoryConfig> {
        let config: InventoryConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse inventory config TOML: {}", e))?;

        if !config.bag.is_usable() || !config.overflow.is_usable() {
            bail!(
                "bag and overflow must have between 1 and {} cells per side",
                GridSize::MAX_SIDE
            );
        }
        let mut slots = BTreeSet::new();
        for slot in &config.equipment {
            if !slots.insert(slot.slot) {
                bail!("equipment slot '{}' is configured twice", slot.slot);
            }
            if !slot.size.is_usable() {
                bail!("equipment slot '{}' has an unusable size {}", slot.slot, slot.size);
            }
        }
        Ok(config)
    }
}
