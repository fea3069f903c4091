//! Shape library: cell offsets of every item shape in each orientation.
//!
//! Shapes are closed, preloaded data. Every orientation is stored normalised
//! (smallest `dx` and `dy` are zero) and sorted, so two orientations compare
//! equal exactly when they cover the same cells. Rotations are generated by
//! repeated 90° clockwise turns until the base orientation reappears, which
//! gives symmetric shapes fewer rotation states (a square has one, a bar two).

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::config::InventoryConfig;
use crate::state::GridSize;

/// Identifier of a shape in the [`ShapeLibrary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ShapeId(pub u16);

impl ShapeId {
    /// 1x1.
    pub const SINGLE: Self = Self(0);
    /// 2x1 horizontal bar.
    pub const BAR_2: Self = Self(1);
    /// 3x1 horizontal bar.
    pub const BAR_3: Self = Self(2);
    /// 4x1 horizontal bar.
    pub const BAR_4: Self = Self(3);
    /// 2x2 square.
    pub const SQUARE_2: Self = Self(4);
    /// 2 wide, 3 tall rectangle.
    pub const RECT_2X3: Self = Self(5);
    pub const L: Self = Self(6);
    pub const J: Self = Self(7);
    pub const T: Self = Self(8);
    pub const S: Self = Self(9);
    pub const Z: Self = Self(10);

    /// First identifier available to data-defined shapes.
    pub const FIRST_CUSTOM: Self = Self(100);
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Offset of one occupied cell relative to a placement anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellOffset {
    pub dx: i32,
    pub dy: i32,
}

impl CellOffset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// 90° clockwise turn in screen coordinates (y grows downwards).
    const fn rotated_cw(self) -> Self {
        Self::new(-self.dy, self.dx)
    }
}

impl From<(i32, i32)> for CellOffset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self::new(dx, dy)
    }
}

/// Cells of one orientation.
pub type ShapeCells = ArrayVec<CellOffset, { InventoryConfig::MAX_SHAPE_CELLS }>;

/// Errors raised while building shape data.
///
/// These only surface while loading tables. Once a shape is registered the
/// library's lookups are total.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("shape has no cells")]
    Empty,

    #[error("shape has {count} cells, limit is {}", InventoryConfig::MAX_SHAPE_CELLS)]
    TooManyCells { count: usize },

    #[error("cell {0:?} is listed twice")]
    DuplicateCell(CellOffset),

    #[error("shape lists {count} rotations, limit is {}", InventoryConfig::MAX_ROTATIONS)]
    TooManyRotations { count: usize },

    #[error("rotation {index} has {found} cells, expected {expected}")]
    InconsistentRotation {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{0} is already registered")]
    DuplicateId(ShapeId),
}

/// Every orientation of one shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeDef {
    rotations: ArrayVec<ShapeCells, { InventoryConfig::MAX_ROTATIONS }>,
}

impl ShapeDef {
    /// Builds a shape from its base orientation, deriving the other rotations.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] when the cell list is empty, too large or has
    /// duplicates.
    pub fn from_cells(cells: &[CellOffset]) -> Result<Self, ShapeError> {
        let base = normalize(cells)?;
        let mut rotations = ArrayVec::new();
        let mut current = base.clone();
        loop {
            rotations.push(current.clone());
            let turned: Vec<CellOffset> = current.iter().map(|c| c.rotated_cw()).collect();
            current = normalize(&turned)?;
            if current == base || rotations.is_full() {
                break;
            }
        }
        Ok(Self { rotations })
    }

    /// Builds a shape from explicitly listed orientations.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] when no orientation is given, too many are given,
    /// or the orientations disagree on cell count.
    pub fn from_rotations(rotations: &[Vec<CellOffset>]) -> Result<Self, ShapeError> {
        if rotations.len() > InventoryConfig::MAX_ROTATIONS {
            return Err(ShapeError::TooManyRotations {
                count: rotations.len(),
            });
        }
        let first = rotations.first().ok_or(ShapeError::Empty)?;
        let mut normalized = ArrayVec::new();
        for (index, cells) in rotations.iter().enumerate() {
            if cells.len() != first.len() {
                return Err(ShapeError::InconsistentRotation {
                    index,
                    expected: first.len(),
                    found: cells.len(),
                });
            }
            normalized.push(normalize(cells)?);
        }
        Ok(Self {
            rotations: normalized,
        })
    }

    /// Number of distinct orientations (always at least one).
    pub fn rotation_count(&self) -> u8 {
        self.rotations.len() as u8
    }

    /// Cells of the given orientation; `rotation` wraps modulo the count.
    pub fn cells(&self, rotation: u8) -> &[CellOffset] {
        let index = rotation as usize % self.rotations.len();
        &self.rotations[index]
    }

    /// Number of cells covered by the shape.
    pub fn cell_count(&self) -> usize {
        self.rotations[0].len()
    }

    /// Bounding box of the given orientation.
    pub fn bounds(&self, rotation: u8) -> GridSize {
        let cells = self.cells(rotation);
        let width = cells.iter().map(|c| c.dx).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|c| c.dy).max().unwrap_or(0) + 1;
        GridSize::new(width as u32, height as u32)
    }
}

fn normalize(cells: &[CellOffset]) -> Result<ShapeCells, ShapeError> {
    if cells.is_empty() {
        return Err(ShapeError::Empty);
    }
    if cells.len() > InventoryConfig::MAX_SHAPE_CELLS {
        return Err(ShapeError::TooManyCells { count: cells.len() });
    }

    let min_x = cells.iter().map(|c| c.dx).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.dy).min().unwrap_or(0);

    let mut out: ShapeCells = cells
        .iter()
        .map(|c| CellOffset::new(c.dx - min_x, c.dy - min_y))
        .collect();
    // Row-major order, matching the grid scan.
    out.sort_unstable_by_key(|c| (c.dy, c.dx));

    if let Some(pair) = out.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(ShapeError::DuplicateCell(pair[0]));
    }
    Ok(out)
}

/// Static table of shapes keyed by [`ShapeId`].
///
/// Lookups by id panic on unknown ids: an item referencing a shape that was
/// never registered is a data bug, not a runtime condition. Loaders validate
/// templates against [`ShapeLibrary::get`] before the engine ever sees them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeLibrary {
    shapes: BTreeMap<ShapeId, ShapeDef>,
}

impl ShapeLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library preloaded with the built-in shapes.
    pub fn builtin() -> Self {
        let table: [(ShapeId, &[(i32, i32)]); 11] = [
            (ShapeId::SINGLE, &[(0, 0)]),
            (ShapeId::BAR_2, &[(0, 0), (1, 0)]),
            (ShapeId::BAR_3, &[(0, 0), (1, 0), (2, 0)]),
            (ShapeId::BAR_4, &[(0, 0), (1, 0), (2, 0), (3, 0)]),
            (ShapeId::SQUARE_2, &[(0, 0), (1, 0), (0, 1), (1, 1)]),
            (
                ShapeId::RECT_2X3,
                &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)],
            ),
            (ShapeId::L, &[(0, 0), (0, 1), (0, 2), (1, 2)]),
            (ShapeId::J, &[(1, 0), (1, 1), (1, 2), (0, 2)]),
            (ShapeId::T, &[(0, 0), (1, 0), (2, 0), (1, 1)]),
            (ShapeId::S, &[(1, 0), (2, 0), (0, 1), (1, 1)]),
            (ShapeId::Z, &[(0, 0), (1, 0), (1, 1), (2, 1)]),
        ];

        let mut library = Self::new();
        for (id, cells) in table {
            let cells: Vec<CellOffset> = cells.iter().copied().map(CellOffset::from).collect();
            let def = ShapeDef::from_cells(&cells).unwrap_or_else(|e| {
                panic!("built-in {id} is malformed: {e}");
            });
            library.shapes.insert(id, def);
        }
        library
    }

    /// Adds a shape to the table.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::DuplicateId` if the id is taken.
    pub fn register(&mut self, id: ShapeId, def: ShapeDef) -> Result<(), ShapeError> {
        if self.shapes.contains_key(&id) {
            return Err(ShapeError::DuplicateId(id));
        }
        self.shapes.insert(id, def);
        Ok(())
    }

    /// Non-panicking lookup, for validating data at load time.
    pub fn get(&self, id: ShapeId) -> Option<&ShapeDef> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.shapes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of distinct orientations of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    pub fn rotation_count(&self, id: ShapeId) -> u8 {
        self.expect_shape(id).rotation_count()
    }

    /// Cell offsets of `id` at `rotation` (taken modulo the rotation count).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    pub fn cells(&self, id: ShapeId, rotation: u8) -> &[CellOffset] {
        self.expect_shape(id).cells(rotation)
    }

    /// Bounding box of `id` at `rotation`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    pub fn bounds(&self, id: ShapeId, rotation: u8) -> GridSize {
        self.expect_shape(id).bounds(rotation)
    }

    fn expect_shape(&self, id: ShapeId) -> &ShapeDef {
        match self.shapes.get(&id) {
            Some(def) => def,
            None => panic!("unknown {id}: shape table and item data are out of sync"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(i32, i32)]) -> Vec<CellOffset> {
        pairs.iter().copied().map(CellOffset::from).collect()
    }

    #[test]
    fn symmetric_shapes_have_fewer_rotations() {
        let library = ShapeLibrary::builtin();
        assert_eq!(library.rotation_count(ShapeId::SINGLE), 1);
        assert_eq!(library.rotation_count(ShapeId::SQUARE_2), 1);
        assert_eq!(library.rotation_count(ShapeId::BAR_3), 2);
        assert_eq!(library.rotation_count(ShapeId::S), 2);
        assert_eq!(library.rotation_count(ShapeId::RECT_2X3), 2);
        assert_eq!(library.rotation_count(ShapeId::L), 4);
        assert_eq!(library.rotation_count(ShapeId::T), 4);
    }

    #[test]
    fn rotation_wraps_modulo_count() {
        let library = ShapeLibrary::builtin();
        assert_eq!(
            library.cells(ShapeId::L, 4),
            library.cells(ShapeId::L, 0)
        );
        assert_eq!(
            library.cells(ShapeId::BAR_2, 3),
            library.cells(ShapeId::BAR_2, 1)
        );
    }

    #[test]
    fn bar_rotates_to_vertical() {
        let library = ShapeLibrary::builtin();
        assert_eq!(library.bounds(ShapeId::BAR_4, 0), GridSize::new(4, 1));
        assert_eq!(library.bounds(ShapeId::BAR_4, 1), GridSize::new(1, 4));
        assert_eq!(
            library.cells(ShapeId::BAR_2, 1),
            cells(&[(0, 0), (0, 1)]).as_slice()
        );
    }

    #[test]
    fn l_shape_first_turn_is_clockwise() {
        let library = ShapeLibrary::builtin();
        // Upright L turned clockwise lies on its back with the foot pointing down.
        assert_eq!(
            library.cells(ShapeId::L, 1),
            cells(&[(0, 0), (1, 0), (2, 0), (0, 1)]).as_slice()
        );
        assert_eq!(library.bounds(ShapeId::L, 1), GridSize::new(3, 2));
    }

    #[test]
    fn offsets_are_normalized() {
        let def = ShapeDef::from_cells(&cells(&[(5, 5), (6, 5)])).unwrap();
        assert_eq!(def.cells(0), cells(&[(0, 0), (1, 0)]).as_slice());
    }

    #[test]
    fn rejects_malformed_cells() {
        assert_eq!(ShapeDef::from_cells(&[]), Err(ShapeError::Empty));
        assert_eq!(
            ShapeDef::from_cells(&cells(&[(0, 0), (0, 0)])),
            Err(ShapeError::DuplicateCell(CellOffset::new(0, 0)))
        );
        let too_many: Vec<CellOffset> = (0..17).map(|x| CellOffset::new(x, 0)).collect();
        assert_eq!(
            ShapeDef::from_cells(&too_many),
            Err(ShapeError::TooManyCells { count: 17 })
        );
    }

    #[test]
    fn explicit_rotations_must_agree_on_cell_count() {
        let result = ShapeDef::from_rotations(&[cells(&[(0, 0), (1, 0)]), cells(&[(0, 0)])]);
        assert_eq!(
            result,
            Err(ShapeError::InconsistentRotation {
                index: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn register_rejects_duplicate_ids() {
        let mut library = ShapeLibrary::builtin();
        let def = ShapeDef::from_cells(&cells(&[(0, 0)])).unwrap();
        assert_eq!(
            library.register(ShapeId::SINGLE, def.clone()),
            Err(ShapeError::DuplicateId(ShapeId::SINGLE))
        );
        library.register(ShapeId::FIRST_CUSTOM, def).unwrap();
        assert!(library.contains(ShapeId::FIRST_CUSTOM));
    }

    #[test]
    #[should_panic(expected = "unknown shape#999")]
    fn unknown_shape_fails_fast() {
        ShapeLibrary::builtin().rotation_count(ShapeId(999));
    }
}
