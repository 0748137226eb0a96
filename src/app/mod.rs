// SPDX-License-Identifier: MPL-2.0
//! Board state core.
//!
//! Every change to a board flows through one path:
//!
//! ```text
//! pointer/keyboard ─▶ selection / interaction ─▶ Action ─▶ BoardStore::dispatch
//!                                                            │
//!                                   reduce(&state, action) ◀─┘
//!                                                            │
//!                      history.record ◀── commit ──▶ watch::Sender<Committed>
//!                                                                   │
//!                                                         persistence::autosave
//! ```
//!
//! The reducer is pure. Gestures keep their intermediate frames local and
//! only emit an action when they stop, so a drag produces one history entry.

pub mod action;
pub mod history;
pub mod interaction;
pub mod paths;
pub mod persistence;
pub mod reducer;
pub mod selection;
pub mod state;
pub mod store;

pub use action::{Action, StickerMove};
pub use history::History;
pub use interaction::{Gesture, GestureKind};
pub use reducer::reduce;
pub use selection::{CanvasLayout, SelectionBox, SelectionPhase, StackedLayout};
pub use state::MoodboardState;
pub use store::{BoardStore, Committed};
