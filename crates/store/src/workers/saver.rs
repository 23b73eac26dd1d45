//! Save worker that drains project snapshots onto the repository.
//!
//! Saves are fire-and-forget for callers: the store worker enqueues a
//! snapshot and moves on. Failures retry with exponential backoff and are
//! only ever logged; a request that still fails after the last attempt is
//! dropped. The queue drains completely before shutdown finishes because
//! the runtime joins this worker after the store worker has stopped.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, warn};

use asset_model::ProjectState;

use crate::repository::ProjectRepository;

/// One queued snapshot save.
pub(crate) struct SaveRequest {
    pub(crate) project_id: String,
    pub(crate) state: ProjectState,
}

/// Background task that writes snapshots sequentially, in arrival order.
pub(crate) struct SaveWorker {
    repository: Arc<dyn ProjectRepository>,
    save_rx: mpsc::Receiver<SaveRequest>,
}

impl SaveWorker {
    pub(crate) fn new(
        repository: Arc<dyn ProjectRepository>,
        save_rx: mpsc::Receiver<SaveRequest>,
    ) -> Self {
        Self {
            repository,
            save_rx,
        }
    }

    /// Main worker loop. Runs until the store worker drops its sender, then
    /// finishes whatever is still queued.
    pub(crate) async fn run(mut self) {
        debug!(target: "asset_store::saver", "save worker started");
        while let Some(request) = self.save_rx.recv().await {
            self.save_with_retry(&request).await;
        }
        debug!(target: "asset_store::saver", "save queue drained, save worker stopping");
    }

    async fn save_with_retry(&self, request: &SaveRequest) {
        const MAX_ATTEMPTS: u32 = 3;
        const BASE_DELAY_MS: u64 = 100;

        let project_id = request.project_id.as_str();
        for attempt in 0..MAX_ATTEMPTS {
            match self.repository.save(project_id, &request.state) {
                Ok(()) => {
                    if attempt > 0 {
                        info!(
                            target: "asset_store::saver",
                            project_id,
                            retries = attempt,
                            "project saved after retrying"
                        );
                    } else {
                        debug!(target: "asset_store::saver", project_id, "project saved");
                    }
                    return;
                }
                Err(e) if attempt < MAX_ATTEMPTS - 1 => {
                    let delay = Duration::from_millis(BASE_DELAY_MS * (1 << attempt));
                    warn!(
                        target: "asset_store::saver",
                        project_id,
                        attempt = attempt + 1,
                        error = %e,
                        "save failed, retrying in {:?}",
                        delay
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    error!(
                        target: "asset_store::saver",
                        project_id,
                        attempts = MAX_ATTEMPTS,
                        error = %e,
                        "save failed, dropping snapshot"
                    );
                }
            }
        }
    }
}
