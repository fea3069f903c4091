//! Content factory for building engine inputs from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use inventory_core::{InventoryConfig, ShapeLibrary, StaticTemplates};

use crate::loaders::{ConfigLoader, LoadResult, ShapeLoader, TemplateLoader};

/// Everything a session needs, loaded and cross-validated.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: InventoryConfig,
    pub shapes: Arc<ShapeLibrary>,
    pub templates: Arc<StaticTemplates>,
}

/// Content factory that loads all inventory content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── inventory.toml   (optional, defaults apply)
/// ├── shapes.ron       (optional, built-in shapes only)
/// └── templates.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the inventory layout from `inventory.toml`.
    pub fn load_config(&self) -> LoadResult<InventoryConfig> {
        let path = self.data_dir.join("inventory.toml");
        if !path.exists() {
            return Ok(InventoryConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load built-in plus custom shapes from `shapes.ron`.
    pub fn load_shapes(&self) -> LoadResult<ShapeLibrary> {
        let path = self.data_dir.join("shapes.ron");
        if !path.exists() {
            return Ok(ShapeLibrary::builtin());
        }
        ShapeLoader::load(&path)
    }

    /// Load the template catalog from `templates.ron`.
    pub fn load_templates(&self, shapes: &ShapeLibrary) -> LoadResult<StaticTemplates> {
        let path = self.data_dir.join("templates.ron");
        TemplateLoader::load(&path, shapes)
    }

    /// Load every content file in dependency order.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let config = self.load_config()?;
        let shapes = self.load_shapes()?;
        let templates = self.load_templates(&shapes)?;
        Ok(ContentBundle {
            config,
            shapes: Arc::new(shapes),
            templates: Arc::new(templates),
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use inventory_core::{ShapeId, TemplateId};

    use super::*;

    fn workspace_data() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data")
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn test_load_workspace_data() {
        let bundle = ContentFactory::new(workspace_data())
            .load_all()
            .expect("bundled data should load");

        assert!(bundle.shapes.contains(ShapeId::FIRST_CUSTOM));
        assert!(bundle.templates.get(&TemplateId::new("pistol")).is_some());
        assert!(!bundle.config.equipment.is_empty());
    }

    #[test]
    fn test_missing_templates_is_an_error() {
        let factory = ContentFactory::new("/nonexistent/inventory-data");
        assert!(factory.load_config().is_ok());
        assert!(factory.load_all().is_err());
    }
}
