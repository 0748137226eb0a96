// SPDX-License-Identifier: MPL-2.0
//! Loads and saves the board and its view settings through a key-value store.

use super::envelope::{self, BOARD_SCHEMA_VERSION, SETTINGS_SCHEMA_VERSION};
use crate::app::state::MoodboardState;
use crate::application::port::KeyValueStore;
use crate::domain::settings::BoardSettings;
use crate::error::Result;
use crate::notifications::Notification;
use chrono::{DateTime, Utc};

/// Store key of the board envelope.
pub const BOARD_KEY: &str = "moodboard-state";

/// Store key of the settings envelope.
pub const SETTINGS_KEY: &str = "moodboard-settings";

/// A board read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub state: MoodboardState,
    pub saved_at: DateTime<Utc>,
    /// Invariant repairs applied while loading; empty for a clean board.
    pub repairs: Vec<String>,
}

/// Versioned persistence on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes `state` under [`BOARD_KEY`].
    ///
    /// The transient drag flag is not persisted.
    pub fn save_board(&self, state: &MoodboardState) -> Result<()> {
        let raw = if state.is_dragging {
            let state = MoodboardState {
                is_dragging: false,
                ..state.clone()
            };
            envelope::encode(BOARD_SCHEMA_VERSION, &state)?
        } else {
            envelope::encode(BOARD_SCHEMA_VERSION, state)?
        };
        self.store.set(BOARD_KEY, &raw)?;
        Ok(())
    }

    /// Reads the saved board, or `None` when nothing has been saved.
    ///
    /// Boards that violate an invariant are repaired rather than rejected;
    /// an unknown schema version is an error.
    pub fn load_board(&self) -> Result<Option<Restored>> {
        let Some(raw) = self.store.get(BOARD_KEY)? else {
            return Ok(None);
        };
        let envelope = envelope::decode::<MoodboardState>(&raw, BOARD_SCHEMA_VERSION)?;
        let (state, repairs) = match envelope.state.validate() {
            Ok(()) => (envelope.state, Vec::new()),
            Err(err) => {
                tracing::warn!(error = %err, "saved board is inconsistent, repairing");
                envelope.state.repaired()
            }
        };
        Ok(Some(Restored {
            state,
            saved_at: envelope.timestamp,
            repairs,
        }))
    }

    pub fn save_settings(&self, settings: &BoardSettings) -> Result<()> {
        settings.validate()?;
        let raw = envelope::encode(SETTINGS_SCHEMA_VERSION, settings)?;
        self.store.set(SETTINGS_KEY, &raw)?;
        Ok(())
    }

    /// Reads and validates the saved settings.
    pub fn load_settings(&self) -> Result<Option<BoardSettings>> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            return Ok(None);
        };
        let settings = envelope::decode::<BoardSettings>(&raw, SETTINGS_SCHEMA_VERSION)?.state;
        settings.validate()?;
        Ok(Some(settings))
    }

    /// Removes both the board and the settings.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(BOARD_KEY)?;
        self.store.remove(SETTINGS_KEY)?;
        Ok(())
    }

    /// Loads the saved board, falling back to the seeded default.
    ///
    /// Never fails: a load error becomes a notification and the default
    /// board, a repaired board yields a warning notification.
    pub fn restore_or_default(&self) -> (MoodboardState, Option<Notification>) {
        match self.load_board() {
            Ok(Some(restored)) if restored.repairs.is_empty() => (restored.state, None),
            Ok(Some(restored)) => {
                let notification = Notification::warning("notification-board-repaired")
                    .with_arg("count", restored.repairs.len().to_string());
                (restored.state, Some(notification))
            }
            Ok(None) => (MoodboardState::default(), None),
            Err(err) => {
                tracing::warn!(error = %err, "could not restore board, starting fresh");
                (MoodboardState::default(), Some(Notification::from_error(&err)))
            }
        }
    }

    /// Loads the saved settings, falling back to defaults.
    pub fn settings_or_default(&self) -> (BoardSettings, Option<Notification>) {
        match self.load_settings() {
            Ok(settings) => (settings.unwrap_or_default(), None),
            Err(err) => {
                tracing::warn!(error = %err, "could not restore board settings");
                (BoardSettings::default(), Some(Notification::from_error(&err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;
    use crate::app::reducer::reduce;
    use crate::domain::board::{SegmentId, StickerDraft};
    use crate::domain::settings::ViewMode;
    use crate::error::{Error, StateError, StorageError};
    use crate::infrastructure::MemoryStore;

    fn bridge() -> PersistenceBridge<MemoryStore> {
        PersistenceBridge::new(MemoryStore::new())
    }

    fn board() -> MoodboardState {
        reduce(
            &MoodboardState::default(),
            Action::AddSticker {
                sticker: StickerDraft::text("s1", "day-1", "Hello"),
            },
        )
        .unwrap()
    }

    #[test]
    fn nothing_saved_loads_none() {
        let bridge = bridge();
        assert_eq!(bridge.load_board().unwrap(), None);
        assert_eq!(bridge.load_settings().unwrap(), None);
        let (state, notification) = bridge.restore_or_default();
        assert_eq!(state, MoodboardState::default());
        assert!(notification.is_none());
    }

    #[test]
    fn board_round_trips() {
        let bridge = bridge();
        bridge.save_board(&board()).unwrap();
        let restored = bridge.load_board().unwrap().unwrap();
        assert_eq!(restored.state, board());
        assert!(restored.repairs.is_empty());
    }

    #[test]
    fn drag_flag_is_not_persisted() {
        let bridge = bridge();
        let dragging = reduce(&board(), Action::SetDragging { dragging: true }).unwrap();
        bridge.save_board(&dragging).unwrap();
        assert!(!bridge.load_board().unwrap().unwrap().state.is_dragging);
    }

    #[test]
    fn unknown_version_is_refused() {
        let bridge = bridge();
        bridge
            .store()
            .set(
                BOARD_KEY,
                r#"{"version":2,"state":{},"timestamp":"2024-01-01T00:00:00Z"}"#,
            )
            .unwrap();
        assert!(matches!(
            bridge.load_board(),
            Err(Error::State(StateError::UnsupportedVersion { found: 2, .. }))
        ));
        let (state, notification) = bridge.restore_or_default();
        assert_eq!(state, MoodboardState::default());
        assert_eq!(
            notification.unwrap().message_key(),
            "error-state-unsupported-version"
        );
    }

    #[test]
    fn inconsistent_board_is_repaired_on_load() {
        let bridge = bridge();
        let mut state = board();
        state.segment_order.clear();
        let raw = envelope::encode(BOARD_SCHEMA_VERSION, &state).unwrap();
        bridge.store().set(BOARD_KEY, &raw).unwrap();

        let restored = bridge.load_board().unwrap().unwrap();
        assert_eq!(restored.state.segment_order, vec![SegmentId::from("day-1")]);
        assert!(!restored.repairs.is_empty());

        let (_, notification) = bridge.restore_or_default();
        assert_eq!(
            notification.unwrap().message_key(),
            "notification-board-repaired"
        );
    }

    #[test]
    fn settings_round_trip_and_validate() {
        let bridge = bridge();
        let settings = BoardSettings {
            view_mode: ViewMode::Map,
            snap_to_grid: true,
            ..BoardSettings::default()
        };
        bridge.save_settings(&settings).unwrap();
        assert_eq!(bridge.load_settings().unwrap(), Some(settings));

        let invalid = BoardSettings {
            zoom: -3.0,
            ..BoardSettings::default()
        };
        assert!(bridge.save_settings(&invalid).is_err());

        let raw = envelope::encode(SETTINGS_SCHEMA_VERSION, &invalid).unwrap();
        bridge.store().set(SETTINGS_KEY, &raw).unwrap();
        assert!(matches!(bridge.load_settings(), Err(Error::Validation(_))));
        let (settings, notification) = bridge.settings_or_default();
        assert_eq!(settings, BoardSettings::default());
        assert!(notification.is_some());
    }

    #[test]
    fn storage_failures_surface_as_storage_errors() {
        let bridge = bridge();
        bridge
            .store()
            .fail_writes_with(Some(StorageError::QuotaExceeded {
                key: BOARD_KEY.into(),
            }));
        assert!(matches!(
            bridge.save_board(&board()),
            Err(Error::Storage(StorageError::QuotaExceeded { .. }))
        ));
    }

    #[test]
    fn clear_removes_everything() {
        let bridge = bridge();
        bridge.save_board(&board()).unwrap();
        bridge.save_settings(&BoardSettings::default()).unwrap();
        bridge.clear().unwrap();
        assert!(bridge.store().is_empty());
    }
}
