// SPDX-License-Identifier: MPL-2.0
//! The single mutation entry point for a board.
//!
//! [`BoardStore`] owns the live state, runs every action through the
//! reducer, records undo history and publishes each committed state on a
//! watch channel. It is passed explicitly to whatever drives the board; there
//! is no ambient global instance.

use super::action::Action;
use super::history::History;
use super::interaction::Gesture;
use super::reducer::reduce;
use super::selection::CanvasLayout;
use super::state::MoodboardState;
use crate::config::Config;
use crate::domain::board::{HistoryCapacity, Sticker};
use crate::error::Result;
use kurbo::Point;
use std::sync::Arc;
use tokio::sync::watch;

/// A committed board state and its revision number.
#[derive(Debug, Clone)]
pub struct Committed {
    /// Increases by one for every state change.
    pub revision: u64,
    pub state: Arc<MoodboardState>,
}

/// Board state owner and dispatch boundary.
#[derive(Debug)]
pub struct BoardStore {
    state: MoodboardState,
    history: History,
    revision: u64,
    /// Set while undo/redo loads a snapshot so it is not recorded again.
    loading_from_history: bool,
    gesture: Option<Gesture>,
    publisher: watch::Sender<Committed>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(MoodboardState::default(), HistoryCapacity::default())
    }
}

impl BoardStore {
    #[must_use]
    pub fn new(initial: MoodboardState, capacity: HistoryCapacity) -> Self {
        let (publisher, _) = watch::channel(Committed {
            revision: 0,
            state: Arc::new(initial.clone()),
        });
        Self {
            history: History::new(at_rest(&initial), capacity),
            state: initial,
            revision: 0,
            loading_from_history: false,
            gesture: None,
            publisher,
        }
    }

    #[must_use]
    pub fn with_config(initial: MoodboardState, config: &Config) -> Self {
        Self::new(initial, config.history.capacity())
    }

    #[must_use]
    pub fn state(&self) -> &MoodboardState {
        &self.state
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Observes committed states.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Committed> {
        self.publisher.subscribe()
    }

    /// Applies one action. On error the board is left untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<&MoodboardState> {
        let transient = action.is_transient();
        let next = reduce(&self.state, action)?;
        self.commit(next, transient);
        Ok(&self.state)
    }

    /// Applies a burst of actions as one change with one history entry.
    ///
    /// If any action fails none of them take effect.
    pub fn dispatch_all<I>(&mut self, actions: I) -> Result<&MoodboardState>
    where
        I: IntoIterator<Item = Action>,
    {
        let mut transient = true;
        let mut next = self.state.clone();
        for action in actions {
            transient &= action.is_transient();
            next = reduce(&next, action)?;
        }
        self.commit(next, transient);
        Ok(&self.state)
    }

    /// Replaces the board wholesale and forgets all history.
    ///
    /// An active gesture is cancelled first.
    pub fn load(&mut self, state: MoodboardState) -> Result<&MoodboardState> {
        self.cancel_gesture()?;
        let next = reduce(
            &self.state,
            Action::LoadState {
                state: Box::new(at_rest(&state)),
            },
        )?;
        self.history.reset(next.clone());
        self.commit(next, true);
        Ok(&self.state)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous snapshot. Returns `false` when there is none.
    ///
    /// An active gesture is cancelled first; its stickers belong to the
    /// state being left.
    pub fn undo(&mut self) -> Result<bool> {
        if !self.can_undo() {
            return Ok(false);
        }
        self.cancel_gesture()?;
        match self.history.undo() {
            Some(snapshot) => self.load_from_history(snapshot).map(|()| true),
            None => Ok(false),
        }
    }

    /// Re-applies the next snapshot. Returns `false` when there is none.
    pub fn redo(&mut self) -> Result<bool> {
        if !self.can_redo() {
            return Ok(false);
        }
        self.cancel_gesture()?;
        match self.history.redo() {
            Some(snapshot) => self.load_from_history(snapshot).map(|()| true),
            None => Ok(false),
        }
    }

    fn load_from_history(&mut self, mut snapshot: MoodboardState) -> Result<()> {
        snapshot.is_dragging = self.state.is_dragging;
        self.loading_from_history = true;
        let result = self
            .dispatch(Action::LoadState {
                state: Box::new(snapshot),
            })
            .map(|_| ());
        self.loading_from_history = false;
        result
    }

    fn commit(&mut self, next: MoodboardState, transient: bool) {
        if next == self.state {
            return;
        }
        self.state = next;
        self.revision += 1;
        if !transient && !self.loading_from_history {
            if self.state.is_dragging {
                self.history.record(&at_rest(&self.state));
            } else {
                self.history.record(&self.state);
            }
        }
        self.publisher.send_replace(Committed {
            revision: self.revision,
            state: Arc::new(self.state.clone()),
        });
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Marks the board as dragging and keeps `gesture` until it finishes.
    pub fn begin_gesture(&mut self, gesture: Gesture) -> Result<()> {
        self.dispatch(Action::SetDragging { dragging: true })?;
        self.gesture = Some(gesture);
        Ok(())
    }

    /// Feeds a pointer position to the active gesture and returns its preview.
    pub fn update_gesture(&mut self, pointer: Point) -> Option<&[Sticker]> {
        self.gesture
            .as_mut()
            .map(|gesture| gesture.update(pointer))
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Ends the active gesture and commits its result, if it has one.
    pub fn finish_gesture(
        &mut self,
        layout: &impl CanvasLayout,
        pointer: Point,
    ) -> Result<Option<Action>> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(None);
        };
        self.dispatch(Action::SetDragging { dragging: false })?;
        let Some(action) = gesture.stop(&self.state, layout, pointer) else {
            return Ok(None);
        };
        self.dispatch(action.clone())?;
        Ok(Some(action))
    }

    /// Abandons the active gesture without committing anything.
    pub fn cancel_gesture(&mut self) -> Result<()> {
        if let Some(gesture) = self.gesture.take() {
            gesture.cancel();
            self.dispatch(Action::SetDragging { dragging: false })?;
        }
        Ok(())
    }
}

/// `state` without the transient drag flag, as history and storage keep it.
fn at_rest(state: &MoodboardState) -> MoodboardState {
    MoodboardState {
        is_dragging: false,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::selection::StackedLayout;
    use crate::domain::board::{StickerDraft, StickerId};

    fn add(id: &str) -> Action {
        Action::AddSticker {
            sticker: StickerDraft::text(id, "day-1", id).sized(100.0, 100.0),
        }
    }

    #[test]
    fn dispatch_records_history_and_bumps_revision() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.history().len(), 2);
        assert!(store.can_undo());
    }

    #[test]
    fn failed_dispatch_changes_nothing() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        assert!(store.dispatch(add("s1")).is_err());
        assert_eq!(store.revision(), 1);
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn noop_actions_are_not_committed() {
        let mut store = BoardStore::default();
        store
            .dispatch(Action::RemoveSticker { id: "ghost".into() })
            .unwrap();
        assert_eq!(store.revision(), 0);
        assert!(!store.can_undo());
    }

    #[test]
    fn undo_and_redo_do_not_grow_history() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        let with_sticker = store.state().clone();

        assert!(store.undo().unwrap());
        assert!(store.state().stickers.is_empty());
        assert!(store.redo().unwrap());
        assert_eq!(store.state(), &with_sticker);
        assert_eq!(store.history().len(), 2);
        assert!(!store.redo().unwrap());
    }

    #[test]
    fn burst_dispatch_is_one_history_entry() {
        let mut store = BoardStore::default();
        store.dispatch_all([add("a"), add("b"), add("c")]).unwrap();
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.state().stickers.len(), 3);

        assert!(store.dispatch_all([add("d"), add("a")]).is_err());
        assert!(store.state().sticker("d").is_none());
    }

    #[test]
    fn drag_flag_stays_out_of_history() {
        let mut store = BoardStore::default();
        store
            .dispatch(Action::SetDragging { dragging: true })
            .unwrap();
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn subscribers_see_the_latest_commit() {
        let mut store = BoardStore::default();
        let receiver = store.subscribe();
        store.dispatch(add("s1")).unwrap();
        store.dispatch(add("s2")).unwrap();
        let committed = receiver.borrow().clone();
        assert_eq!(committed.revision, 2);
        assert_eq!(committed.state.stickers.len(), 2);
    }

    #[test]
    fn gesture_commits_once_on_finish() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        let layout = StackedLayout::default();
        let id = StickerId::new("s1");

        let gesture = Gesture::start_move(store.state(), &id, Point::new(50.0, 50.0)).unwrap();
        store.begin_gesture(gesture).unwrap();
        assert!(store.state().is_dragging);
        for step in 1..=10 {
            let preview = store
                .update_gesture(Point::new(50.0 + f64::from(step), 50.0))
                .unwrap();
            assert_eq!(preview[0].x, f64::from(step));
        }
        assert_eq!(store.state().sticker("s1").unwrap().x, 0.0);

        let action = store
            .finish_gesture(&layout, Point::new(60.0, 50.0))
            .unwrap();
        assert!(matches!(action, Some(Action::MoveSticker { .. })));
        assert!(!store.state().is_dragging);
        assert_eq!(store.state().sticker("s1").unwrap().x, 10.0);
        assert_eq!(store.history().len(), 3);

        store.undo().unwrap();
        assert_eq!(store.state().sticker("s1").unwrap().x, 0.0);
        assert!(!store.state().is_dragging);
    }

    #[test]
    fn cancelled_gesture_leaves_sticker_in_place() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        let gesture =
            Gesture::start_move(store.state(), &"s1".into(), Point::new(50.0, 50.0)).unwrap();
        store.begin_gesture(gesture).unwrap();
        store.update_gesture(Point::new(400.0, 400.0));
        store.cancel_gesture().unwrap();
        assert_eq!(store.state().sticker("s1").unwrap().x, 0.0);
        assert!(!store.state().is_dragging);
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn edits_during_a_gesture_do_not_record_the_drag_flag() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        let layout = StackedLayout::default();

        let gesture =
            Gesture::start_move(store.state(), &"s1".into(), Point::new(50.0, 50.0)).unwrap();
        store.begin_gesture(gesture).unwrap();
        store
            .dispatch(Action::RotateSticker {
                id: "s1".into(),
                rotation: 45.0,
            })
            .unwrap();
        store.update_gesture(Point::new(60.0, 50.0));
        store
            .finish_gesture(&layout, Point::new(60.0, 50.0))
            .unwrap();
        store
            .dispatch(Action::RenameSegment {
                id: "day-1".into(),
                title: "Arrival".into(),
            })
            .unwrap();

        assert!(store.undo().unwrap());
        assert!(store.undo().unwrap());
        assert!(!store.state().is_dragging);
        assert_eq!(store.state().sticker("s1").unwrap().rotation, 45.0);

        store
            .dispatch(Action::SelectSticker { id: "s1".into() })
            .unwrap();
        assert_eq!(store.state().selected_sticker_ids, vec![StickerId::new("s1")]);
    }

    #[test]
    fn undo_during_a_gesture_cancels_it() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        store.dispatch(add("s2")).unwrap();
        let layout = StackedLayout::default();

        let gesture =
            Gesture::start_move(store.state(), &"s1".into(), Point::new(50.0, 50.0)).unwrap();
        store.begin_gesture(gesture).unwrap();
        store.update_gesture(Point::new(80.0, 50.0));

        assert!(store.undo().unwrap());
        assert!(store.gesture().is_none());
        assert!(!store.state().is_dragging);
        assert!(store.state().sticker("s2").is_none());

        let revision = store.revision();
        assert_eq!(
            store
                .finish_gesture(&layout, Point::new(80.0, 50.0))
                .unwrap(),
            None
        );
        assert_eq!(store.revision(), revision);
        assert_eq!(store.state().sticker("s1").unwrap().x, 0.0);

        assert!(store.redo().unwrap());
        assert!(store.state().sticker("s2").is_some());
    }

    #[test]
    fn load_cancels_gesture_and_drops_drag_flag() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        let gesture =
            Gesture::start_move(store.state(), &"s1".into(), Point::new(50.0, 50.0)).unwrap();
        store.begin_gesture(gesture).unwrap();

        let dragging = MoodboardState {
            is_dragging: true,
            ..MoodboardState::default()
        };
        store.load(dragging).unwrap();
        assert!(store.gesture().is_none());
        assert!(!store.state().is_dragging);
        assert!(!store.history().current().unwrap().is_dragging);
    }

    #[test]
    fn load_resets_history() {
        let mut store = BoardStore::default();
        store.dispatch(add("s1")).unwrap();
        store.load(MoodboardState::default()).unwrap();
        assert!(!store.can_undo());
        assert!(store.state().stickers.is_empty());
    }
}
