//! Topic-based event bus for session events.
//!
//! Engine notifications are borrowed and synchronous; the session converts
//! them into owned events and fans them out per topic so UI, audio or
//! logging consumers subscribe only to what they need.

mod bus;
mod types;

pub use bus::{EventBus, SessionEvent, Topic};
pub use types::{ContainerChange, ContainerEvent, TransferEvent};
