//! Occupancy map of one inventory.
//!
//! Every occupied cell points at exactly one [`PlacementRecord`] whose
//! footprint covers it, and footprints never overlap. All mutations validate
//! first and then commit; nothing is ever partially written.

use std::collections::BTreeMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::env::{ShapeId, ShapeLibrary};

use super::{GridPosition, GridSize, ItemInstance, PlacementRecord, RecordId};

/// Shape and orientation to test against the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub shape: ShapeId,
    pub rotation: u8,
    /// Record to treat as absent, when re-validating an item that is already
    /// placed.
    pub ignore: Option<RecordId>,
}

impl Candidate {
    pub const fn new(shape: ShapeId, rotation: u8) -> Self {
        Self {
            shape,
            rotation,
            ignore: None,
        }
    }

    pub const fn excluding(mut self, id: RecordId) -> Self {
        self.ignore = Some(id);
        self
    }
}

/// Fixed-size occupancy grid.
#[derive(Clone, Debug)]
pub struct GridStore {
    size: GridSize,
    cells: Vec<Option<RecordId>>,
    records: BTreeMap<RecordId, PlacementRecord>,
    shapes: Arc<ShapeLibrary>,
}

impl GridStore {
    pub fn new(size: GridSize, shapes: Arc<ShapeLibrary>) -> Self {
        Self {
            size,
            cells: vec![None; size.area()],
            records: BTreeMap::new(),
            shapes,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn shapes(&self) -> &Arc<ShapeLibrary> {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Absolute cells covered by `shape` at `rotation` anchored at `position`.
    ///
    /// A cell whose coordinates overflow `i32` comes out as `None`; callers
    /// treat it as out of bounds.
    pub fn footprint(
        &self,
        position: GridPosition,
        shape: ShapeId,
        rotation: u8,
    ) -> impl Iterator<Item = Option<GridPosition>> + '_ {
        self.shapes
            .cells(shape, rotation)
            .iter()
            .map(move |c| position.offset(c.dx, c.dy))
    }

    /// True iff every cell of the candidate is in bounds and not held by
    /// another record.
    pub fn is_valid_position(&self, position: GridPosition, candidate: &Candidate) -> bool {
        self.footprint(position, candidate.shape, candidate.rotation)
            .all(|cell| match self.size.index_of_cell(cell) {
                Some(index) => match self.cells[index] {
                    None => true,
                    Some(owner) => candidate.ignore == Some(owner),
                },
                None => false,
            })
    }

    /// Commits `record` at its declared position.
    ///
    /// # Errors
    ///
    /// Hands the record back untouched if its id is already present or its
    /// footprint is invalid. The grid is not modified.
    pub fn place(&mut self, record: PlacementRecord) -> Result<(), PlacementRecord> {
        let candidate = Candidate::new(record.shape(), record.rotation());
        if self.records.contains_key(&record.id())
            || !self.is_valid_position(record.position(), &candidate)
        {
            return Err(record);
        }

        self.write_cells(record.id(), record.position(), record.shape(), record.rotation());
        self.records.insert(record.id(), record);
        Ok(())
    }

    /// Clears every cell owned by `id` and returns its record.
    pub fn remove(&mut self, id: RecordId) -> Option<PlacementRecord> {
        let record = self.records.remove(&id)?;
        self.clear_cells(record.position(), record.shape(), record.rotation());
        Some(record)
    }

    /// Moves and/or turns a placed record in one step.
    ///
    /// The record's current cells are ignored during validation. Returns
    /// false, changing nothing, if `id` is unknown or the new footprint does
    /// not fit.
    pub fn relocate(&mut self, id: RecordId, position: GridPosition, rotation: u8) -> bool {
        let Some(record) = self.records.get(&id) else {
            return false;
        };
        let (shape, old_position, old_rotation) =
            (record.shape(), record.position(), record.rotation());

        let candidate = Candidate::new(shape, rotation).excluding(id);
        if !self.is_valid_position(position, &candidate) {
            return false;
        }

        self.clear_cells(old_position, shape, old_rotation);
        self.write_cells(id, position, shape, rotation);
        if let Some(record) = self.records.get_mut(&id) {
            record.set_placement(position, rotation);
        }
        true
    }

    /// First valid anchor in row-major order, or `None` if the grid has no
    /// room for the candidate anywhere.
    ///
    /// Deterministic: the same occupancy and candidate always give the same
    /// answer.
    pub fn find_valid_position(&self, candidate: &Candidate) -> Option<GridPosition> {
        let bounds = self.shapes.bounds(candidate.shape, candidate.rotation);
        if bounds.width > self.size.width || bounds.height > self.size.height {
            return None;
        }
        let max_x = (self.size.width - bounds.width) as i32;
        let max_y = (self.size.height - bounds.height) as i32;

        (0..=max_y)
            .flat_map(|y| (0..=max_x).map(move |x| GridPosition::new(x, y)))
            .find(|&position| self.is_valid_position(position, candidate))
    }

    /// Record covering the cell at `position`, if any.
    pub fn occupied_at(&self, position: GridPosition) -> Option<&PlacementRecord> {
        let index = self.size.index_of(position)?;
        let id = self.cells[index]?;
        self.records.get(&id)
    }

    pub fn get(&self, id: RecordId) -> Option<&PlacementRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    /// Mutable access to a placed item's state. Placement stays fixed.
    pub fn instance_mut(&mut self, id: RecordId) -> Option<&mut ItemInstance> {
        self.records.get_mut(&id).map(PlacementRecord::instance_mut)
    }

    pub(crate) fn record_mut(&mut self, id: RecordId) -> Option<&mut PlacementRecord> {
        self.records.get_mut(&id)
    }

    /// Records in id order.
    pub fn records(&self) -> impl Iterator<Item = &PlacementRecord> {
        self.records.values()
    }

    /// Owned copy of every record; later grid changes do not affect it.
    pub fn all_records(&self) -> Vec<PlacementRecord> {
        self.records.values().cloned().collect()
    }

    /// Drops every record, keeping the size.
    pub fn clear(&mut self) {
        self.records.clear();
        self.cells.fill(None);
    }

    /// Drops every record and rebuilds the grid at `size`.
    pub fn reset(&mut self, size: GridSize) {
        self.size = size;
        self.records.clear();
        self.cells = vec![None; size.area()];
    }

    /// Resizes while keeping records at their positions.
    ///
    /// Only succeeds when every record still lies fully inside the new
    /// bounds; otherwise returns false and changes nothing.
    pub fn resize_preserving(&mut self, size: GridSize) -> bool {
        let fits = self.records.values().all(|record| {
            self.footprint(record.position(), record.shape(), record.rotation())
                .all(|cell| size.index_of_cell(cell).is_some())
        });
        if !fits {
            return false;
        }

        let records = std::mem::take(&mut self.records);
        self.size = size;
        self.cells = vec![None; size.area()];
        for (id, record) in &records {
            self.write_cells(*id, record.position(), record.shape(), record.rotation());
        }
        self.records = records;
        true
    }

    /// Checks the occupancy invariants from scratch.
    ///
    /// Every record is in bounds, every footprint cell points back at its
    /// record, and no other cell is marked.
    pub fn verify_integrity(&self) -> bool {
        let mut expected = vec![None; self.size.area()];
        for (id, record) in &self.records {
            if record.id() != *id {
                return false;
            }
            for cell in self.footprint(record.position(), record.shape(), record.rotation()) {
                match self.size.index_of_cell(cell) {
                    Some(index) if expected[index].is_none() => expected[index] = Some(*id),
                    _ => return false,
                }
            }
        }
        expected == self.cells
    }

    /// SHA-256 over the grid size and every placement, in id order.
    ///
    /// Two grids with equal digests hold the same items (by instance id) at
    /// the same positions and orientations.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.size.width.to_le_bytes());
        hasher.update(self.size.height.to_le_bytes());
        for record in self.records.values() {
            let template = record.instance().template_id().as_str().as_bytes();
            hasher.update(record.id().0.to_le_bytes());
            hasher.update(record.instance().id().as_uuid().as_bytes());
            hasher.update((template.len() as u32).to_le_bytes());
            hasher.update(template);
            hasher.update(record.shape().0.to_le_bytes());
            hasher.update(record.position().x.to_le_bytes());
            hasher.update(record.position().y.to_le_bytes());
            hasher.update([record.rotation()]);
            hasher.update(record.stack_count().to_le_bytes());
        }
        hasher.finalize().into()
    }

    fn write_cells(&mut self, id: RecordId, position: GridPosition, shape: ShapeId, rotation: u8) {
        let indices: Vec<usize> = self
            .footprint(position, shape, rotation)
            .filter_map(|cell| self.size.index_of_cell(cell))
            .collect();
        for index in indices {
            self.cells[index] = Some(id);
        }
    }

    fn clear_cells(&mut self, position: GridPosition, shape: ShapeId, rotation: u8) {
        let indices: Vec<usize> = self
            .footprint(position, shape, rotation)
            .filter_map(|cell| self.size.index_of_cell(cell))
            .collect();
        for index in indices {
            self.cells[index] = None;
        }
    }
}
