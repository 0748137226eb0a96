// SPDX-License-Identifier: MPL-2.0
//! `moodboard` is the state core of a trip-planning moodboard.
//!
//! Stickers (text, images, icons, links, map pins and template-based custom
//! cards) are placed on time segments, the days of a trip. The crate owns
//! the board model, the pure action reducer, selection and pointer gestures,
//! undo/redo history, and versioned persistence with debounced autosave.
//! Rendering, export rasterization and lookups are left to collaborators
//! behind the traits in [`application::port`].
//!
//! ```
//! use moodboard::app::{Action, BoardStore};
//! use moodboard::domain::board::StickerDraft;
//!
//! let mut store = BoardStore::default();
//! store
//!     .dispatch(Action::AddSticker {
//!         sticker: StickerDraft::text("note-1", "day-1", "Pack umbrella"),
//!     })
//!     .expect("day-1 exists on a fresh board");
//! assert!(store.can_undo());
//! store.undo().expect("undo");
//! assert!(store.state().stickers.is_empty());
//! ```

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod notifications;
