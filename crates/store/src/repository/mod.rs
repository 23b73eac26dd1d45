//! Repository layer for project persistence.
//!
//! Repositories hold whole-project snapshots keyed by project id. The store
//! loads lazily on first touch and writes through the save worker; nothing
//! else talks to a repository directly.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileProjectRepository;
pub use memory::InMemoryProjectRepository;
pub use traits::ProjectRepository;

pub(crate) use error::Result;

/// Project ids double as file names, so only path-safe characters pass.
pub(crate) fn is_valid_project_id(project_id: &str) -> bool {
    !project_id.is_empty()
        && project_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_ids_must_be_path_safe() {
        assert!(is_valid_project_id("citadel-v2"));
        assert!(is_valid_project_id("p1"));
        assert!(is_valid_project_id("Back_Up"));

        assert!(!is_valid_project_id(""));
        assert!(!is_valid_project_id("../escape"));
        assert!(!is_valid_project_id("two words"));
        assert!(!is_valid_project_id("dot.json"));
    }
}
