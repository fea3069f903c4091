//! Content loaders for reading inventory data from files.

pub mod config;
pub mod factory;
pub mod shapes;
pub mod templates;

pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use shapes::{ShapeLoader, ShapeSpec};
pub use templates::{TemplateCatalog, TemplateLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
