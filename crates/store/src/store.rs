//! High-level store runtime.
//!
//! The store owns the background workers, wires up the command and save
//! channels, and exposes a builder-based API for choosing the repository
//! and resource catalog.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use asset_model::ResourceCatalog;

use crate::api::{StoreError, StoreHandle};
use crate::repository::{InMemoryProjectRepository, ProjectRepository};
use crate::workers::{Command, SaveWorker, StoreWorker};
use crate::workspace::Workspace;

/// Store configuration shared across the runtime and workers.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub command_buffer_size: usize,
    pub save_buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32,
            save_buffer_size: 8,
        }
    }
}

/// Running store that owns the workers.
///
/// [`StoreHandle`] provides a cloneable facade for clients; the store
/// itself only exists to hand out handles and to shut down cleanly.
pub struct AssetStore {
    handle: StoreHandle,
    store_worker_handle: JoinHandle<()>,
    save_worker_handle: JoinHandle<()>,
}

impl AssetStore {
    /// Create a new store builder.
    pub fn builder() -> AssetStoreBuilder {
        AssetStoreBuilder::new()
    }

    /// Get a cloneable handle to this store.
    ///
    /// The handle implements [`DataStore`] and can be shared across clients
    /// and async tasks.
    ///
    /// [`DataStore`]: crate::api::DataStore
    pub fn handle(&self) -> StoreHandle {
        self.handle.clone()
    }

    /// Shutdown the store gracefully.
    ///
    /// Dropping the last handle closes the command channel; the store
    /// worker stops, which closes the save queue; the save worker finishes
    /// whatever is queued. Every save enqueued before this call completes
    /// before it returns.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        drop(self.handle);

        self.store_worker_handle
            .await
            .map_err(StoreError::WorkerJoin)?;
        self.save_worker_handle
            .await
            .map_err(StoreError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`AssetStore`] with flexible configuration.
pub struct AssetStoreBuilder {
    config: StoreConfig,
    repository: Option<Arc<dyn ProjectRepository>>,
    catalog: Option<ResourceCatalog>,
}

impl AssetStoreBuilder {
    fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            repository: None,
            catalog: None,
        }
    }

    /// Override store configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repository backing project persistence (default: in-memory).
    pub fn repository(mut self, repository: impl ProjectRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set the capacity catalog for keyed resources (default: stock limits).
    pub fn catalog(mut self, catalog: ResourceCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the store and spawn its workers.
    pub async fn build(self) -> AssetStore {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryProjectRepository::new()));
        let catalog = Arc::new(self.catalog.unwrap_or_default());

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (save_tx, save_rx) = mpsc::channel(self.config.save_buffer_size);

        let handle = StoreHandle::new(command_tx);

        let workspace = Workspace::new(repository.clone(), catalog);
        let store_worker = StoreWorker::new(workspace, command_rx, save_tx);
        let store_worker_handle = tokio::spawn(async move {
            store_worker.run().await;
        });

        let save_worker = SaveWorker::new(repository, save_rx);
        let save_worker_handle = tokio::spawn(async move {
            save_worker.run().await;
        });

        AssetStore {
            handle,
            store_worker_handle,
            save_worker_handle,
        }
    }
}
