// SPDX-License-Identifier: MPL-2.0
//! User notifications.
//!
//! Failures that must not touch board state (storage errors, autosave
//! failures, unreadable settings) are reported as a [`Notification`] carrying
//! a Fluent message key. Producers send them over an unbounded channel; the
//! front end owns a [`Manager`], drains that channel and renders what it
//! flushes.
//!
//! # Example
//!
//! ```
//! use moodboard::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::warning("notification-autosave-failed").with_arg("error", "disk full"));
//! assert_eq!(manager.visible_count(), 1);
//! assert_eq!(manager.flush().len(), 1);
//! ```

mod manager;
mod notification;

pub use manager::Manager;
pub use notification::{Notification, Severity};
