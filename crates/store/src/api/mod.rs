//! Public store API surface.
//!
//! This module gathers the types exposed to consumers of the store crate so
//! the other layers can stay focused on the workspace, workers, and
//! repositories.

pub mod contract;
pub mod errors;
pub mod handle;

pub use contract::DataStore;
pub use errors::{RequestFailed, Result, StoreError};
pub use handle::StoreHandle;
