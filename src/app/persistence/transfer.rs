// SPDX-License-Identifier: MPL-2.0
//! Board files for moving a board between machines.
//!
//! A board file holds the same versioned envelope as the key-value store,
//! pretty-printed.

use super::bridge::Restored;
use super::envelope::{self, Envelope, BOARD_SCHEMA_VERSION};
use crate::app::state::MoodboardState;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Writes `state` to `path`, replacing any existing file.
pub fn export_board(state: &MoodboardState, path: &Path) -> Result<()> {
    let state = MoodboardState {
        is_dragging: false,
        ..state.clone()
    };
    let json = serde_json::to_string_pretty(&Envelope::new(BOARD_SCHEMA_VERSION, state))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "board exported");
    Ok(())
}

/// Reads a board file.
///
/// Unreadable or malformed files fail with [`Error::Import`]; a file written
/// by a newer schema keeps its [`StateError`](crate::error::StateError). The
/// imported board is repaired if it breaks an invariant.
pub fn import_board(path: &Path) -> Result<Restored> {
    let raw = fs::read_to_string(path)
        .map_err(|err| Error::Import(format!("cannot read {}: {err}", path.display())))?;
    let envelope = envelope::decode::<MoodboardState>(&raw, BOARD_SCHEMA_VERSION).map_err(
        |err| match err {
            Error::State(_) => err,
            other => Error::Import(format!("{}: {other}", path.display())),
        },
    )?;
    let (state, repairs) = match envelope.state.validate() {
        Ok(()) => (envelope.state, Vec::new()),
        Err(_) => envelope.state.repaired(),
    };
    tracing::info!(path = %path.display(), repairs = repairs.len(), "board imported");
    Ok(Restored {
        state,
        saved_at: envelope.timestamp,
        repairs,
    })
}
