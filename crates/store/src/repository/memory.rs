//! In-memory ProjectRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use asset_model::ProjectState;

use super::{ProjectRepository, RepositoryError, Result};

/// In-memory implementation of [`ProjectRepository`].
///
/// Snapshots live in a map behind an `RwLock`; nothing survives the process.
pub struct InMemoryProjectRepository {
    projects: RwLock<BTreeMap<String, ProjectState>>,
}

impl InMemoryProjectRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn list(&self) -> Result<Vec<String>> {
        let projects = self
            .projects
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(projects.keys().cloned().collect())
    }

    fn exists(&self, project_id: &str) -> bool {
        self.projects
            .read()
            .map(|projects| projects.contains_key(project_id))
            .unwrap_or(false)
    }

    fn load(&self, project_id: &str) -> Result<Option<ProjectState>> {
        let projects = self
            .projects
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(projects.get(project_id).cloned())
    }

    fn save(&self, project_id: &str, state: &ProjectState) -> Result<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        projects.insert(project_id.to_string(), state.clone());
        Ok(())
    }
}
