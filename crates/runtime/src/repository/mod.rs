//! Save slots for whole sessions.
//!
//! The in-memory repository backs tests; the file repository writes one
//! bincode file per named save.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use memory::InMemorySessionRepo;
pub use traits::SessionRepository;
