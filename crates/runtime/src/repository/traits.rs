//! Repository contract for persisting whole sessions.

use crate::repository::Result;
use crate::snapshot::SessionSnapshot;

/// Named save slots.
///
/// Implementations store complete [`SessionSnapshot`]s; the session itself
/// decides when to capture and restore.
pub trait SessionRepository: Send + Sync {
    /// Save a snapshot under `name`, replacing any previous one
    fn save(&self, name: &str, snapshot: &SessionSnapshot) -> Result<()>;

    /// Load the snapshot saved under `name`
    fn load(&self, name: &str) -> Result<Option<SessionSnapshot>>;

    /// Check if a save exists
    fn exists(&self, name: &str) -> bool;

    /// Delete a save
    fn delete(&self, name: &str) -> Result<()>;

    /// List all save names, sorted
    fn list(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
