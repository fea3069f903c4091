use std::fmt;

/// Grid-local key of a placement record.
///
/// Allocated by the owning inventory and unrelated to the instance id: the
/// same item gets a new record id every time it lands in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RecordId(pub u32);

impl RecordId {
    pub const FIRST: Self = Self(1);

    /// Returns the id following this one, or `None` once the id space is
    /// used up.
    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anchor cell of a placement, in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell at `(dx, dy)` from this one, or `None` if it falls outside the
    /// coordinate space.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Largest width or height a grid may have.
    pub const MAX_SIDE: u32 = 1024;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True iff both sides are non-zero and within [`Self::MAX_SIDE`].
    pub const fn is_usable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.width <= Self::MAX_SIDE
            && self.height <= Self::MAX_SIDE
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Smallest size covering both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Row-major index of a footprint cell, or `None` when the cell is out
    /// of bounds or its coordinates overflowed.
    #[inline]
    pub fn index_of_cell(&self, cell: Option<GridPosition>) -> Option<usize> {
        cell.and_then(|position| self.index_of(position))
    }

    /// Row-major index of `position`, or `None` when it is out of bounds.
    #[inline]
    pub fn index_of(&self, position: GridPosition) -> Option<usize> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (x, y) = (position.x as u32, position.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
