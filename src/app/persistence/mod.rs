// SPDX-License-Identifier: MPL-2.0
//! Board persistence.
//!
//! Boards and their view settings are stored as versioned JSON envelopes
//! (`{version, state, timestamp}`) in a
//! [`KeyValueStore`](crate::application::port::KeyValueStore). Loading a
//! version this build does not know fails with
//! [`StateError::UnsupportedVersion`](crate::error::StateError) instead of
//! coercing the data.
//!
//! - [`PersistenceBridge`]: save/load/clear through a store
//! - [`autosave`]: debounced background writes of committed revisions
//! - [`export_board`] / [`import_board`]: standalone board files

pub mod autosave;
mod bridge;
mod envelope;
mod transfer;

pub use autosave::AutosaveHandle;
pub use bridge::{PersistenceBridge, Restored, BOARD_KEY, SETTINGS_KEY};
pub use envelope::{decode, encode, Envelope, BOARD_SCHEMA_VERSION, SETTINGS_SCHEMA_VERSION};
pub use transfer::{export_board, import_board};
