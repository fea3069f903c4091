//! Read-only item data.
//!
//! The shape table and the template store are static for a session. The
//! engine reaches templates only through the injected [`TemplateResolver`]
//! and shapes only through a shared [`ShapeLibrary`], so nothing here depends
//! on how the data was loaded.
mod shapes;
mod snapshot;
mod templates;

pub use shapes::{CellOffset, ShapeCells, ShapeDef, ShapeError, ShapeId, ShapeLibrary};
pub use snapshot::StaticTemplates;
pub use templates::{
    AmmoRules, BowRules, ConsumableRules, DurabilityRules, EnergySourceRules, KeyItemRules,
    OxygenTankRules, RangedWeaponRules, Template, TemplateId, TemplateResolver, TemplateRules,
    ToolRules, TypeTag, TypeTagSet, WeaponRules,
};
