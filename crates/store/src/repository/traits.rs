//! Repository contract for saving and loading project snapshots.

use asset_model::ProjectState;

use super::Result;

/// Storage of whole-project snapshots keyed by project id.
///
/// Implementations are shared behind an `Arc` by the store and save workers;
/// calls must be safe from any task. A single store instance owns its
/// repository, so no cross-process coordination is expected.
pub trait ProjectRepository: Send + Sync {
    /// All stored project ids, sorted ascending.
    fn list(&self) -> Result<Vec<String>>;

    /// Whether a snapshot exists for this id.
    fn exists(&self, project_id: &str) -> bool;

    /// Load a project snapshot; `None` if nothing is stored under the id.
    fn load(&self, project_id: &str) -> Result<Option<ProjectState>>;

    /// Store a project snapshot, replacing any previous one.
    fn save(&self, project_id: &str, state: &ProjectState) -> Result<()>;
}
