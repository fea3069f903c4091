//! Addressing of the inventories a session owns.

use std::fmt;

use inventory_core::EquipmentSlot;
use serde::{Deserialize, Serialize};

/// One inventory inside an [`crate::InventorySession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerId {
    /// The player's main grid.
    Bag,
    /// Single-item pickup container used when the bag is full.
    Overflow,
    Equipment(EquipmentSlot),
}

impl ContainerId {
    pub fn is_equipment(&self) -> bool {
        matches!(self, ContainerId::Equipment(_))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Bag => f.write_str("bag"),
            ContainerId::Overflow => f.write_str("overflow"),
            ContainerId::Equipment(slot) => write!(f, "equipment:{}", slot),
        }
    }
}

impl From<EquipmentSlot> for ContainerId {
    fn from(slot: EquipmentSlot) -> Self {
        ContainerId::Equipment(slot)
    }
}
