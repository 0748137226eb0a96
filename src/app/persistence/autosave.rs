// SPDX-License-Identifier: MPL-2.0
//! Debounced autosave driven by committed store revisions.
//!
//! The scheduler watches the store's committed-state channel instead of
//! individual actions. A burst of commits restarts the debounce timer, so
//! only the latest revision of a burst is written. Revisions that were
//! already written are skipped. When the store goes away any pending
//! revision is flushed immediately.
//!
//! Write failures are logged and sent as notifications; they never reach
//! board state.

use super::bridge::PersistenceBridge;
use crate::app::store::Committed;
use crate::application::port::KeyValueStore;
use crate::domain::settings::AutosaveDelay;
use crate::notifications::Notification;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Handle to a running autosave task.
#[derive(Debug)]
pub struct AutosaveHandle {
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Waits for the task to finish. It finishes once the store is dropped
    /// and any pending revision has been written.
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            if !err.is_cancelled() {
                tracing::error!(error = %err, "autosave task panicked");
            }
        }
    }

    /// Stops the task without flushing.
    pub fn abort(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns the autosave task on the current tokio runtime.
///
/// The revision visible on `committed` at spawn time counts as already
/// saved.
pub fn spawn<S>(
    bridge: Arc<PersistenceBridge<S>>,
    committed: watch::Receiver<Committed>,
    delay: AutosaveDelay,
    notifications: mpsc::UnboundedSender<Notification>,
) -> AutosaveHandle
where
    S: KeyValueStore + 'static,
{
    let task = tokio::spawn(run(bridge, committed, delay, notifications));
    AutosaveHandle { task }
}

async fn run<S: KeyValueStore>(
    bridge: Arc<PersistenceBridge<S>>,
    mut committed: watch::Receiver<Committed>,
    delay: AutosaveDelay,
    notifications: mpsc::UnboundedSender<Notification>,
) {
    let mut saved = committed.borrow_and_update().revision;
    tracing::debug!(revision = saved, delay_ms = delay.as_millis(), "autosave started");

    loop {
        if committed.changed().await.is_err() {
            break;
        }

        // Debounce: every new commit restarts the timer.
        let closed = loop {
            match timeout(delay.as_duration(), committed.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => break true,
                Err(_) => break false,
            }
        };

        save_latest(&bridge, &mut committed, &mut saved, &notifications);
        if closed {
            break;
        }
    }

    // The sender may have published one last revision before going away.
    save_latest(&bridge, &mut committed, &mut saved, &notifications);
    tracing::debug!(revision = saved, "autosave stopped");
}

fn save_latest<S: KeyValueStore>(
    bridge: &PersistenceBridge<S>,
    committed: &mut watch::Receiver<Committed>,
    saved: &mut u64,
    notifications: &mpsc::UnboundedSender<Notification>,
) {
    let latest = committed.borrow_and_update().clone();
    if latest.revision == *saved {
        return;
    }
    match bridge.save_board(&latest.state) {
        Ok(()) => {
            *saved = latest.revision;
            tracing::info!(revision = latest.revision, "board autosaved");
        }
        Err(err) => {
            tracing::warn!(revision = latest.revision, error = %err, "autosave failed");
            let notification = Notification::warning("notification-autosave-failed")
                .with_arg("error", err.to_string());
            // Nobody listening is fine; the failure is already logged.
            let _ = notifications.send(notification);
        }
    }
}
