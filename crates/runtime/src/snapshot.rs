//! Serialized form of a whole session.

use inventory_core::InventorySnapshot;
use serde::{Deserialize, Serialize};

use crate::container::ContainerId;
use crate::error::{Result, RuntimeError};

/// Every container of a session, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub format_version: u32,
    pub containers: Vec<ContainerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub container: ContainerId,
    pub inventory: InventorySnapshot,
}

impl SessionSnapshot {
    pub const FORMAT_VERSION: u32 = 1;

    /// Snapshot with no containers; loading it empties every container.
    pub fn empty() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            containers: Vec::new(),
        }
    }

    pub fn container(&self, id: ContainerId) -> Option<&InventorySnapshot> {
        self.containers
            .iter()
            .find(|c| c.container == id)
            .map(|c| &c.inventory)
    }

    /// Total number of placed items across all containers.
    pub fn item_count(&self) -> usize {
        self.containers
            .iter()
            .map(|c| c.inventory.records.len())
            .sum()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RuntimeError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| RuntimeError::Serialization(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RuntimeError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| RuntimeError::Serialization(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self> {
        if self.format_version != Self::FORMAT_VERSION {
            return Err(RuntimeError::Serialization(format!(
                "unsupported save format version {} (expected {})",
                self.format_version,
                Self::FORMAT_VERSION
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_mismatch_is_rejected() {
        let mut snapshot = SessionSnapshot::empty();
        snapshot.format_version = 99;
        let bytes = snapshot.to_bytes().unwrap();
        assert!(matches!(
            SessionSnapshot::from_bytes(&bytes),
            Err(RuntimeError::Serialization(_))
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(SessionSnapshot::from_bytes(&[0xff; 3]).is_err());
        assert!(SessionSnapshot::from_json("{\"containers\": 3}").is_err());
    }
}
