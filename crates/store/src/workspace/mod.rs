//! Single-owner engine behind the store worker.
//!
//! The workspace holds every loaded [`ProjectState`] and implements each
//! contract operation as a synchronous method returning the rich
//! [`StoreError`]. The worker owns the only instance, so there is no
//! locking here; per-address serialization falls out of single ownership.
//!
//! Projects load lazily from the repository on first touch and stay cached
//! for the lifetime of the store. Writing back is the save worker's job.

mod levels;
mod resources;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use asset_model::{ProjectState, ResourceCatalog, ResourceKey};

use crate::api::StoreError;
use crate::repository::{ProjectRepository, is_valid_project_id};

pub(crate) struct Workspace {
    repository: Arc<dyn ProjectRepository>,
    catalog: Arc<ResourceCatalog>,
    projects: BTreeMap<String, ProjectState>,
}

impl Workspace {
    pub(crate) fn new(
        repository: Arc<dyn ProjectRepository>,
        catalog: Arc<ResourceCatalog>,
    ) -> Self {
        Self {
            repository,
            catalog,
            projects: BTreeMap::new(),
        }
    }

    /// All known project ids: loaded plus repository-stored, sorted and
    /// deduplicated.
    pub(crate) fn projects(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = self.repository.list()?;
        ids.extend(self.projects.keys().cloned());
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Creates an empty project in memory. Duplicates are checked against
    /// both the cache and the repository.
    pub(crate) fn new_project(&mut self, project_id: &str) -> Result<(), StoreError> {
        if !is_valid_project_id(project_id) {
            return Err(StoreError::InvalidProjectId(project_id.to_string()));
        }
        if self.projects.contains_key(project_id) || self.repository.exists(project_id) {
            return Err(StoreError::ProjectExists(project_id.to_string()));
        }

        self.projects
            .insert(project_id.to_string(), ProjectState::new());
        debug!(target: "asset_store::workspace", project_id, "created project");
        Ok(())
    }

    /// Clone of the current project state, for the save queue.
    pub(crate) fn snapshot(&mut self, project_id: &str) -> Result<ProjectState, StoreError> {
        Ok(self.project(project_id)?.clone())
    }

    /// Loads the project into the cache if the repository has it.
    fn ensure_loaded(&mut self, project_id: &str) -> Result<(), StoreError> {
        if self.projects.contains_key(project_id) {
            return Ok(());
        }

        match self.repository.load(project_id)? {
            Some(state) => {
                debug!(
                    target: "asset_store::workspace",
                    project_id,
                    "loaded project from repository"
                );
                self.projects.insert(project_id.to_string(), state);
                Ok(())
            }
            None => Err(StoreError::UnknownProject(project_id.to_string())),
        }
    }

    fn project(&mut self, project_id: &str) -> Result<&ProjectState, StoreError> {
        self.ensure_loaded(project_id)?;
        self.projects
            .get(project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut ProjectState, StoreError> {
        self.ensure_loaded(project_id)?;
        self.projects
            .get_mut(project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))
    }

    /// Capacity gate for keyed upserts; unknown types are unbounded.
    fn admit(&self, key: ResourceKey) -> Result<(), StoreError> {
        if self.catalog.admits(key) {
            return Ok(());
        }
        Err(StoreError::CapacityExceeded {
            key,
            limit: self.catalog.max_entries_for(key.resource_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProjectRepository;

    pub(super) fn workspace() -> Workspace {
        Workspace::new(
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(ResourceCatalog::default()),
        )
    }

    pub(super) fn workspace_with(repository: Arc<dyn ProjectRepository>) -> Workspace {
        Workspace::new(repository, Arc::new(ResourceCatalog::default()))
    }

    #[test]
    fn new_project_validates_and_rejects_duplicates() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        assert!(matches!(
            ws.new_project("p1"),
            Err(StoreError::ProjectExists(_))
        ));
        assert!(matches!(
            ws.new_project("two words"),
            Err(StoreError::InvalidProjectId(_))
        ));
        assert!(matches!(
            ws.new_project(""),
            Err(StoreError::InvalidProjectId(_))
        ));
        assert_eq!(ws.projects().unwrap(), vec!["p1".to_string()]);
    }

    #[test]
    fn projects_lists_union_of_memory_and_repository() {
        let repository = Arc::new(InMemoryProjectRepository::new());
        repository.save("stored", &ProjectState::new()).unwrap();

        let mut ws = workspace_with(repository);
        ws.new_project("fresh").unwrap();

        assert_eq!(
            ws.projects().unwrap(),
            vec!["fresh".to_string(), "stored".to_string()]
        );
        assert!(matches!(
            ws.new_project("stored"),
            Err(StoreError::ProjectExists(_))
        ));
    }

    #[test]
    fn projects_load_lazily_from_the_repository() {
        let repository = Arc::new(InMemoryProjectRepository::new());
        let mut stored = ProjectState::new();
        stored.materialize_archive("a1");
        repository.save("stored", &stored).unwrap();

        let mut ws = workspace_with(repository);
        assert!(ws.projects.is_empty());

        let snapshot = ws.snapshot("stored").unwrap();
        assert_eq!(snapshot, stored);
        assert!(ws.projects.contains_key("stored"));

        assert!(matches!(
            ws.snapshot("missing"),
            Err(StoreError::UnknownProject(_))
        ));
    }
}
