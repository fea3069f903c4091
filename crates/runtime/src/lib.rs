//! Calling layer around the inventory engine.
//!
//! This crate wires engine inventories into a player session and surrounds
//! them with the pieces the engine deliberately leaves out: sequencing across
//! containers, event fan-out, logging and save slots.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts [`InventorySession`], the bag/overflow/equipment owner
//! - [`events`] provides the topic-based event bus
//! - [`snapshot`] defines the serialized session format (JSON and bincode)
//! - [`repository`] stores snapshots in named save slots
pub mod container;
pub mod error;
pub mod events;
pub mod repository;
pub mod session;
pub mod snapshot;

pub use container::ContainerId;
pub use error::{Result, RuntimeError};
pub use events::{ContainerChange, ContainerEvent, EventBus, SessionEvent, Topic, TransferEvent};
pub use repository::{
    FileSessionRepository, InMemorySessionRepo, RepositoryError, SessionRepository,
};
pub use session::InventorySession;
pub use snapshot::{ContainerSnapshot, SessionSnapshot};
