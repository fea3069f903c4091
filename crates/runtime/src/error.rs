//! Errors surfaced by the session layer.

use inventory_core::{EquipmentSlot, InventoryError};
use thiserror::Error;

use crate::container::ContainerId;
use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("container '{0}' is not configured")]
    UnknownContainer(ContainerId),

    #[error("equipment slot '{0}' is empty")]
    EmptySlot(EquipmentSlot),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// The underlying engine error, if this failure came from the engine.
    pub fn as_inventory(&self) -> Option<&InventoryError> {
        match self {
            RuntimeError::Inventory(error) => Some(error),
            _ => None,
        }
    }
}
