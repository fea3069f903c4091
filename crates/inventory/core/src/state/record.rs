use crate::env::ShapeId;

use super::{GridPosition, ItemInstance, RecordId};

/// Binding of one instance to one position and orientation in one grid.
///
/// The record exclusively owns its instance while placed. The shape is
/// captured from the template at placement time so the grid never needs to
/// resolve templates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementRecord {
    id: RecordId,
    instance: ItemInstance,
    shape: ShapeId,
    position: GridPosition,
    rotation: u8,
    stack_count: u16,
}

impl PlacementRecord {
    pub fn new(
        id: RecordId,
        instance: ItemInstance,
        shape: ShapeId,
        position: GridPosition,
        rotation: u8,
    ) -> Self {
        Self {
            id,
            instance,
            shape,
            position,
            rotation,
            stack_count: 1,
        }
    }

    pub fn with_stack_count(mut self, stack_count: u16) -> Self {
        self.stack_count = stack_count.max(1);
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn instance(&self) -> &ItemInstance {
        &self.instance
    }

    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn stack_count(&self) -> u16 {
        self.stack_count
    }

    /// Detaches the instance, consuming the record.
    pub fn into_instance(self) -> ItemInstance {
        self.instance
    }

    pub(crate) fn instance_mut(&mut self) -> &mut ItemInstance {
        &mut self.instance
    }

    pub(crate) fn set_placement(&mut self, position: GridPosition, rotation: u8) {
        self.position = position;
        self.rotation = rotation;
    }

    pub(crate) fn set_stack_count(&mut self, stack_count: u16) {
        self.stack_count = stack_count.max(1);
    }
}
