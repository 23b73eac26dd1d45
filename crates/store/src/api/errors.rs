//! Error types surfaced by the store API.
//!
//! The contract deliberately exposes a single opaque failure. The richer
//! [`StoreError`] taxonomy exists for the worker, which logs it before
//! erasing it to [`RequestFailed`], and for the store lifecycle calls.

use thiserror::Error;

use asset_model::{ObjectId, PatchError, ResourceKey};

pub use crate::repository::RepositoryError;

/// Boundary result: success payload or an opaque failure.
pub type Result<T> = std::result::Result<T, RequestFailed>;

/// The only failure the asynchronous contract surfaces.
///
/// Carries no payload. The cause is logged inside the store worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("store request failed")]
pub struct RequestFailed;

/// Internal failure taxonomy, also returned by store lifecycle calls.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown project {0:?}")]
    UnknownProject(String),

    #[error("project {0:?} already exists")]
    ProjectExists(String),

    #[error("invalid project id {0:?} (expected [A-Za-z0-9_-]+)")]
    InvalidProjectId(String),

    #[error("archive {archive_id:?} has no level {level_id}")]
    UnknownLevel { archive_id: String, level_id: usize },

    #[error("tile ({x}, {y}) is outside the level grid")]
    TileOutOfBounds { x: u32, y: u32 },

    #[error("level has no object {0}")]
    UnknownObject(ObjectId),

    #[error("no resource stored under {0}")]
    UnknownResource(ResourceKey),

    #[error("unknown {kind} {id:?}")]
    UnknownEntry { kind: &'static str, id: String },

    #[error("{key} is beyond the catalog capacity of {limit} entries")]
    CapacityExceeded { key: ResourceKey, limit: usize },

    #[error("{name} slot {index} is out of range (limit {limit})")]
    SlotOutOfRange {
        name: &'static str,
        index: usize,
        limit: usize,
    },

    #[error(transparent)]
    InvalidPatch(#[from] PatchError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("store worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
