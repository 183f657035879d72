//! Background sweep that evicts stale cache entries
//!
//! The reaper runs as a tokio task and listens on a shutdown channel so it can
//! be stopped and joined. Dropping the sender side also ends the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::store::{Clock, Store};

/// Handle for controlling the background reaper task
#[derive(Debug)]
pub(crate) struct ReaperHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Spawns the reaper on the current tokio runtime
    ///
    /// Every `interval` the task removes entries whose age exceeds `interval`.
    /// The first, immediate tick of the ticker is skipped.
    pub(crate) fn spawn(store: Arc<Store>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = store.sweep(clock.now(), interval);
                        if removed > 0 {
                            debug!(removed, remaining = store.len(), "reaped stale cache entries");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }

            info!("cache reaper stopped");
        });

        Self { shutdown_tx, task }
    }

    /// Whether the background task is still looping
    pub(crate) fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signals the reaper to stop and waits for it to finish
    pub(crate) async fn stop(self) {
        // A closed channel means the task already exited.
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}
