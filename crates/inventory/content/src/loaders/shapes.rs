//! Custom shape table loader.
//!
//! Shapes are listed either by their base orientation (`cells`), from which
//! the other orientations are derived, or by every orientation explicitly
//! (`rotations`) for shapes whose turned forms are authored by hand.

use std::path::Path;

use anyhow::{Context, bail};
use inventory_core::{CellOffset, ShapeDef, ShapeId, ShapeLibrary};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One shape entry in `shapes.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub id: ShapeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cells: Vec<(i32, i32)>,
    #[serde(default)]
    pub rotations: Vec<Vec<(i32, i32)>>,
}

impl ShapeSpec {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({name})", self.id),
            None => self.id.to_string(),
        }
    }

    /// Builds the shape definition from whichever form was given.
    pub fn build(&self) -> LoadResult<ShapeDef> {
        let offsets = |cells: &[(i32, i32)]| -> Vec<CellOffset> {
            cells.iter().copied().map(CellOffset::from).collect()
        };
        let def = match (self.cells.is_empty(), self.rotations.is_empty()) {
            (false, true) => ShapeDef::from_cells(&offsets(&self.cells)),
            (true, false) => {
                let rotations: Vec<Vec<CellOffset>> =
                    self.rotations.iter().map(|r| offsets(r)).collect();
                ShapeDef::from_rotations(&rotations)
            }
            (true, true) => bail!("shape {} lists neither cells nor rotations", self.label()),
            (false, false) => bail!("shape {} lists both cells and rotations", self.label()),
        };
        def.with_context(|| format!("invalid shape {}", self.label()))
    }
}

/// Shape table structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ShapeTable {
    #[serde(default)]
    shapes: Vec<ShapeSpec>,
}

/// Loader for custom shapes from RON files.
pub struct ShapeLoader;

impl ShapeLoader {
    /// Loads `path` on top of the built-in shapes.
    ///
    /// Custom ids must not collide with a built-in or with each other.
    pub fn load(path: &Path) -> LoadResult<ShapeLibrary> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ShapeLibrary> {
        let table: ShapeTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse shape table RON: {}", e))?;

        let mut library = ShapeLibrary::builtin();
        for spec in &table.shapes {
            let def = spec.build()?;
            library
                .register(spec.id, def)
                .with_context(|| format!("cannot register shape {}", spec.label()))?;
        }
        Ok(library)
    }
}
