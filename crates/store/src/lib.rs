//! Asynchronous store for hierarchical game-asset projects.
//!
//! This crate wires the data-access contract, the single-owner workspace,
//! repositories, and worker tasks into a cohesive store API. Consumers
//! build an [`AssetStore`], clone [`StoreHandle`]s from it, and drive every
//! operation through the [`DataStore`] trait.
//!
//! Modules are organized by responsibility:
//! - [`store`] hosts the runtime and builder
//! - [`api`] exposes the contract, handle, and error types
//! - [`repository`] provides the pluggable persistence backends
//! - `workers` and the workspace stay internal to the crate
pub mod api;
pub mod repository;
pub mod store;

mod workers;
mod workspace;

pub use api::{DataStore, RequestFailed, Result, StoreError, StoreHandle};
pub use repository::{
    FileProjectRepository, InMemoryProjectRepository, ProjectRepository, RepositoryError,
};
pub use store::{AssetStore, AssetStoreBuilder, StoreConfig};
