// SPDX-License-Identifier: MPL-2.0
//! Notification collection.
//!
//! The `Manager` gathers notifications from every producer (autosave, the
//! persistence bridge, command handlers), limits how many are visible and
//! keeps the rest queued until the visible ones are flushed.

use super::notification::{Notification, Severity};
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// Maximum number of notifications visible at once.
const MAX_VISIBLE: usize = 3;

/// Visible notifications plus a backlog, both in arrival order.
#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification` now if there is room, otherwise queues it.
    ///
    /// Warnings and errors are also logged.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => {
                tracing::warn!(key = notification.message_key(), args = ?notification.message_args(), "notification");
            }
            Severity::Error => {
                tracing::error!(key = notification.message_key(), args = ?notification.message_args(), "notification");
            }
            Severity::Success | Severity::Info => {}
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_back(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Pushes everything currently waiting on `receiver` without blocking.
    /// Returns how many notifications were received.
    pub fn drain(&mut self, receiver: &mut mpsc::UnboundedReceiver<Notification>) -> usize {
        let mut received = 0;
        while let Ok(notification) = receiver.try_recv() {
            self.push(notification);
            received += 1;
        }
        received
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Removes and returns the visible notifications, then promotes the
    /// next ones from the queue.
    pub fn flush(&mut self) -> Vec<Notification> {
        let shown: Vec<Notification> = self.visible.drain(..).collect();
        while self.visible.len() < MAX_VISIBLE {
            match self.queue.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
        shown
    }
}
