use crate::env::TypeTagSet;
use crate::state::GridSize;

/// Inventory layout constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryConfig {
    /// Size of the player's main bag.
    pub bag: GridSize,
    /// Initial size of the pickup overflow container. It grows to fit whatever
    /// single item it holds and shrinks back on clear.
    pub overflow: GridSize,
    /// One single-purpose inventory per equipment slot.
    #[cfg_attr(feature = "serde", serde(default = "EquipmentSlotConfig::defaults"))]
    pub equipment: Vec<EquipmentSlotConfig>,
}

impl InventoryConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of cells a single shape may occupy.
    pub const MAX_SHAPE_CELLS: usize = 16;
    /// Maximum number of distinct orientations of a shape.
    pub const MAX_ROTATIONS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BAG: GridSize = GridSize::new(10, 10);
    pub const DEFAULT_OVERFLOW: GridSize = GridSize::new(1, 1);

    pub fn new() -> Self {
        Self {
            bag: Self::DEFAULT_BAG,
            overflow: Self::DEFAULT_OVERFLOW,
            equipment: EquipmentSlotConfig::defaults(),
        }
    }

    pub fn with_bag(mut self, bag: GridSize) -> Self {
        self.bag = bag;
        self
    }

    /// Looks up the configuration for one equipment slot.
    pub fn slot(&self, slot: EquipmentSlot) -> Option<&EquipmentSlotConfig> {
        self.equipment.iter().find(|config| config.slot == slot)
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Named equipment slot.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    PrimaryWeapon,
    Sidearm,
    Melee,
    Body,
    Tool,
    Oxygen,
}

/// Equipment slot layout: grid size and accepted item kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSlotConfig {
    pub slot: EquipmentSlot,
    pub size: GridSize,
    pub accepts: TypeTagSet,
}

impl EquipmentSlotConfig {
    pub fn new(slot: EquipmentSlot, size: GridSize, accepts: TypeTagSet) -> Self {
        Self {
            slot,
            size,
            accepts,
        }
    }

    /// Default slot layout used when no configuration file is supplied.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                EquipmentSlot::PrimaryWeapon,
                GridSize::new(5, 2),
                TypeTagSet::RANGED_WEAPON | TypeTagSet::BOW,
            ),
            Self::new(
                EquipmentSlot::Sidearm,
                GridSize::new(3, 2),
                TypeTagSet::RANGED_WEAPON,
            ),
            Self::new(
                EquipmentSlot::Melee,
                GridSize::new(2, 4),
                TypeTagSet::MELEE_WEAPON | TypeTagSet::UNARMED,
            ),
            Self::new(EquipmentSlot::Body, GridSize::new(3, 3), TypeTagSet::CLOTHING),
            Self::new(EquipmentSlot::Tool, GridSize::new(2, 3), TypeTagSet::TOOL),
            Self::new(
                EquipmentSlot::Oxygen,
                GridSize::new(2, 3),
                TypeTagSet::OXYGEN_TANK,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_every_slot() {
        use strum::IntoEnumIterator;

        let config = InventoryConfig::default();
        for slot in EquipmentSlot::iter() {
            assert!(config.slot(slot).is_some(), "missing slot {slot}");
        }
        assert_eq!(config.bag, GridSize::new(10, 10));
    }

    #[test]
    fn slot_names_parse_case_insensitively() {
        let slot: EquipmentSlot = "Primary_Weapon".parse().unwrap();
        assert_eq!(slot, EquipmentSlot::PrimaryWeapon);
        assert_eq!(EquipmentSlot::Oxygen.as_ref(), "oxygen");
    }
}
