//! File-based ProjectRepository implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use asset_model::ProjectState;

use super::{ProjectRepository, RepositoryError, Result, is_valid_project_id};

/// File-based implementation of [`ProjectRepository`].
///
/// Each project is one pretty-printed `{id}.json` document under the base
/// directory, written via a temp file and an atomic rename so a crashed save
/// never leaves a torn snapshot behind. JSON keeps saves inspectable and
/// diffable, which matters more here than compactness.
pub struct FileProjectRepository {
    base_dir: PathBuf,
}

impl FileProjectRepository {
    /// Create a repository rooted at the given directory, creating it if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Create a repository in the platform data directory.
    pub fn in_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "asset-store").ok_or_else(|| {
            RepositoryError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no home directory available",
            ))
        })?;
        Self::new(dirs.data_dir().join("projects"))
    }

    /// Path of a project file; ids are validated so they cannot traverse out
    /// of the base directory.
    fn project_path(&self, project_id: &str) -> Result<PathBuf> {
        if !is_valid_project_id(project_id) {
            return Err(RepositoryError::InvalidProjectId(project_id.to_string()));
        }
        Ok(self.base_dir.join(format!("{project_id}.json")))
    }
}

impl ProjectRepository for FileProjectRepository {
    fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;
        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(project_id) = filename.strip_suffix(".json")
                && is_valid_project_id(project_id)
            {
                ids.push(project_id.to_string());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    fn exists(&self, project_id: &str) -> bool {
        self.project_path(project_id)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn load(&self, project_id: &str) -> Result<Option<ProjectState>> {
        let path = self.project_path(project_id)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let state: ProjectState = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("loaded project {:?} from {}", project_id, path.display());

        Ok(Some(state))
    }

    fn save(&self, project_id: &str, state: &ProjectState) -> Result<()> {
        let path = self.project_path(project_id)?;
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("saved project {:?} to {}", project_id, path.display());

        Ok(())
    }
}
