//! Mutable engine state: item instances, placements and grids.
mod common;
mod grid;
mod instance;
mod item_state;
mod record;

pub use common::{GridPosition, GridSize, RecordId};
pub use grid::{Candidate, GridStore};
pub use instance::{InstanceId, ItemInstance, StateMut};
pub use item_state::{
    AmmoState, BowState, ConsumableState, Durability, EnergyLink, EnergySourceState, ItemState,
    OxygenTankState, RangedWeaponState, ToolState,
};
pub use record::PlacementRecord;
