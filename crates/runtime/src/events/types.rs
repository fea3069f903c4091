//! Owned event payloads published by a session.

use inventory_core::{GridPosition, InstanceId, InventoryEvent, RecordId, TemplateId};
use serde::{Deserialize, Serialize};

use crate::container::ContainerId;

/// A committed change inside one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEvent {
    pub container: ContainerId,
    pub change: ContainerChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerChange {
    ItemAdded {
        record: RecordId,
        instance: InstanceId,
        template: TemplateId,
        position: GridPosition,
        rotation: u8,
    },
    ItemRemoved {
        record: RecordId,
        instance: InstanceId,
    },
    DataChanged,
}

impl From<&InventoryEvent<'_>> for ContainerChange {
    fn from(event: &InventoryEvent<'_>) -> Self {
        match event {
            InventoryEvent::ItemAdded(record) => ContainerChange::ItemAdded {
                record: record.id(),
                instance: record.instance().id(),
                template: record.instance().template_id().clone(),
                position: record.position(),
                rotation: record.rotation(),
            },
            InventoryEvent::ItemRemoved { id, instance } => ContainerChange::ItemRemoved {
                record: *id,
                instance: *instance,
            },
            InventoryEvent::DataChanged => ContainerChange::DataChanged,
        }
    }
}

/// An item that moved between two containers.
///
/// The destination holds a fresh instance; `source_instance` no longer exists
/// anywhere in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub template: TemplateId,
    pub from: ContainerId,
    pub source_record: RecordId,
    pub source_instance: InstanceId,
    pub to: ContainerId,
    pub destination_record: RecordId,
    pub destination_instance: InstanceId,
}
