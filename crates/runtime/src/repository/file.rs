//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, SessionRepository};
use crate::snapshot::SessionSnapshot;

/// File-based implementation of SessionRepository.
///
/// Each save is a `{name}.bin` file in bincode format, written through a
/// temporary file and renamed into place.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    pub fn save_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidName(name.to_owned()));
        }
        Ok(self.base_dir.join(format!("{}.bin", name)))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, name: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.save_path(name)?;
        let temp_path = path.with_extension("bin.tmp");

        let bytes = snapshot
            .to_bytes()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved session '{}' to {}", name, path.display());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SessionSnapshot>> {
        let path = self.save_path(name)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot = SessionSnapshot::from_bytes(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded session '{}' from {}", name, path.display());
        Ok(Some(snapshot))
    }

    fn exists(&self, name: &str) -> bool {
        self.save_path(name).map(|p| p.exists()).unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.save_path(name)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted session '{}'", name);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(name) = filename.strip_suffix(".bin")
            {
                names.push(name.to_owned());
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}
