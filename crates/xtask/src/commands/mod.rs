//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod demo_save;
mod inspect_save;
mod list_saves;

pub use check_content::CheckContent;
pub use demo_save::DemoSave;
pub use inspect_save::InspectSave;
pub use list_saves::ListSaves;
