//! Grid inventory engine: shapes, templates, item instances and placement.
//!
//! `inventory-core` defines the canonical rules for placing rotated,
//! multi-cell items on fixed-size grids. Immutable item data ([`Template`])
//! is reached through an injected [`TemplateResolver`]; mutable per-item state
//! lives in [`ItemInstance`]. All grid mutation flows through [`Inventory`],
//! which validates placements against the [`GridStore`] and notifies observers
//! only after a change has fully committed.
//!
//! The crate performs no I/O and no logging. Callers own sequencing across
//! inventories (see [`inventory::transfer`]) and persistence (see the
//! `serde`-gated `persist` module).
pub mod config;
pub mod env;
pub mod error;
pub mod inventory;
#[cfg(feature = "serde")]
pub mod persist;
pub mod state;

pub use config::{EquipmentSlot, EquipmentSlotConfig, InventoryConfig};
pub use env::{
    AmmoRules, BowRules, CellOffset, ConsumableRules, DurabilityRules, EnergySourceRules,
    KeyItemRules, OxygenTankRules, RangedWeaponRules, ShapeCells, ShapeDef, ShapeError, ShapeId,
    ShapeLibrary, StaticTemplates, Template, TemplateId, TemplateResolver, TemplateRules,
    ToolRules, TypeTag, TypeTagSet, WeaponRules,
};
pub use error::{CoreError, ErrorSeverity};
pub use inventory::{
    FnPolicy, Inventory, InventoryBuilder, InventoryError, InventoryEvent, InventoryPolicy,
    KindFilterPolicy, Observer, RejectReason, SingleSlotPolicy, StandardPolicy, transfer,
};
#[cfg(feature = "serde")]
pub use persist::{InstanceRecord, InventorySnapshot, PlacementSnapshot};
pub use state::{
    AmmoState, BowState, Candidate, ConsumableState, Durability, EnergyLink, EnergySourceState,
    GridPosition, GridSize, GridStore, InstanceId, ItemInstance, ItemState, OxygenTankState,
    PlacementRecord, RangedWeaponState, RecordId, StateMut, ToolState,
};
