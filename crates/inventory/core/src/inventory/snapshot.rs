//! Whole-inventory capture and restore.

use std::sync::Arc;

use crate::persist::{InventorySnapshot, PlacementSnapshot};
use crate::state::{GridSize, GridStore, PlacementRecord};

use super::events::emit;
use super::{Inventory, InventoryError, InventoryEvent, Result};

impl Inventory {
    /// Captures every placement, instance state and the id counter.
    ///
    /// # Errors
    ///
    /// `CorruptData` if an instance state cannot be encoded.
    pub fn snapshot(&self) -> Result<InventorySnapshot> {
        let records = self
            .grid
            .records()
            .map(PlacementSnapshot::capture)
            .collect::<Result<Vec<_>>>()?;
        Ok(InventorySnapshot {
            size: self.grid.size(),
            next_record_id: self.next_id,
            records,
        })
    }

    /// Replaces the whole contents with `snapshot`.
    ///
    /// The new grid is built off to the side and swapped in only when every
    /// record restored and placed cleanly; on error the inventory is
    /// unchanged. Policies are not consulted.
    ///
    /// Shapes come from the resolved templates. A record whose saved shape
    /// disagrees with its template is corrupt, and stack counts are clamped
    /// to the template's `max_stack`.
    ///
    /// # Errors
    ///
    /// `CorruptData` for an unusable grid size, unknown or mismatched
    /// shapes, bad rotations, overlapping or out-of-bounds records, an
    /// exhausted record id, or any instance that fails to restore.
    pub fn restore_snapshot(&mut self, snapshot: &InventorySnapshot) -> Result<()> {
        if !snapshot.size.is_usable() {
            return Err(InventoryError::corrupt(format!(
                "grid size {} is empty or larger than {} per side",
                snapshot.size,
                GridSize::MAX_SIDE
            )));
        }

        let shapes = Arc::clone(self.grid.shapes());
        let mut grid = GridStore::new(snapshot.size, Arc::clone(&shapes));
        let mut next_id = snapshot.next_record_id;

        for entry in &snapshot.records {
            let instance = entry.instance.restore(self.resolver.as_ref())?;
            let Some(template) = self.resolver.resolve(instance.template_id()) else {
                return Err(InventoryError::corrupt(format!(
                    "record {} references unknown template '{}'",
                    entry.id,
                    instance.template_id()
                )));
            };
            if template.shape != entry.shape {
                return Err(InventoryError::corrupt(format!(
                    "record {} saved as {} but '{}' is {}",
                    entry.id,
                    entry.shape,
                    template.id,
                    template.shape
                )));
            }
            let Some(shape) = shapes.get(entry.shape) else {
                return Err(InventoryError::corrupt(format!(
                    "record {} uses unknown {}",
                    entry.id, entry.shape
                )));
            };
            if entry.rotation >= shape.rotation_count() {
                return Err(InventoryError::corrupt(format!(
                    "record {} has rotation {} but {} has {}",
                    entry.id,
                    entry.rotation,
                    entry.shape,
                    shape.rotation_count()
                )));
            }

            let stack_count = entry.stack_count.clamp(1, template.max_stack.max(1));
            let record =
                PlacementRecord::new(entry.id, instance, entry.shape, entry.position, entry.rotation)
                    .with_stack_count(stack_count);
            if grid.place(record).is_err() {
                return Err(InventoryError::corrupt(format!(
                    "record {} at {} overlaps another record or leaves the grid",
                    entry.id, entry.position
                )));
            }
            if entry.id >= next_id {
                next_id = entry.id.next().ok_or_else(|| {
                    InventoryError::corrupt(format!("record {} exhausts the id space", entry.id))
                })?;
            }
        }

        self.grid = grid;
        self.next_id = next_id;
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Ok(())
    }
}
