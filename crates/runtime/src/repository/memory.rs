//! In-memory SessionRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, SessionRepository};
use crate::snapshot::SessionSnapshot;

/// In-memory implementation of SessionRepository.
#[derive(Default)]
pub struct InMemorySessionRepo {
    saves: RwLock<BTreeMap<String, SessionSnapshot>>,
}

impl InMemorySessionRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepo {
    fn save(&self, name: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(name.to_owned(), snapshot.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SessionSnapshot>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(name).cloned())
    }

    fn exists(&self, name: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(name))
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().cloned().collect())
    }
}
