//! Data-driven inventory content and its loaders.
//!
//! Item templates and custom shapes are authored in RON, the inventory
//! layout in TOML. Loaders validate cross references (template shapes,
//! weapon ammunition) so the engine never sees a template whose shape is
//! missing from the table.
//!
//! Content is read-only input to the engine and never appears in saves.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, ShapeLoader, ShapeSpec, TemplateCatalog,
    TemplateLoader,
};
