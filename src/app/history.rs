// SPDX-License-Identifier: MPL-2.0
//! Snapshot history bookkeeping (undo/redo).
//!
//! The history is a linear list of full board snapshots with a cursor. The
//! entry under the cursor always equals the live state. Recording after an
//! undo discards the redo tail; there is no branching.

use super::state::MoodboardState;
use crate::domain::board::HistoryCapacity;
use std::collections::VecDeque;

/// Capped linear undo stack.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<MoodboardState>,
    index: usize,
    capacity: HistoryCapacity,
}

impl History {
    /// Creates a history whose first entry is `initial`.
    #[must_use]
    pub fn new(initial: MoodboardState, capacity: HistoryCapacity) -> Self {
        let mut snapshots = VecDeque::with_capacity(capacity.value().min(64));
        snapshots.push_back(initial);
        Self {
            snapshots,
            index: 0,
            capacity,
        }
    }

    /// Appends a snapshot after the cursor and moves the cursor onto it.
    ///
    /// Entries after the cursor are dropped first. A snapshot equal to the
    /// current entry is not recorded, so recording is idempotent. Returns
    /// whether an entry was added.
    pub fn record(&mut self, snapshot: &MoodboardState) -> bool {
        if self.current() == Some(snapshot) {
            return false;
        }
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push_back(snapshot.clone());
        while self.snapshots.len() > self.capacity.value() {
            self.snapshots.pop_front();
        }
        self.index = self.snapshots.len() - 1;
        true
    }

    /// Whether an undo operation is currently possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a redo operation is currently possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Steps back and returns a copy of the snapshot to load.
    pub fn undo(&mut self) -> Option<MoodboardState> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        tracing::debug!(index = self.index, len = self.len(), "history undo");
        self.current().cloned()
    }

    /// Steps forward and returns a copy of the snapshot to load.
    pub fn redo(&mut self) -> Option<MoodboardState> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        tracing::debug!(index = self.index, len = self.len(), "history redo");
        self.current().cloned()
    }

    /// Snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&MoodboardState> {
        self.snapshots.get(self.index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn capacity(&self) -> HistoryCapacity {
        self.capacity
    }

    /// Drops every entry and restarts from `initial`.
    pub fn reset(&mut self, initial: MoodboardState) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::TimeSegment;

    fn with_segments(count: i32) -> MoodboardState {
        let mut state = MoodboardState::default();
        for order in 1..=count {
            let segment = TimeSegment::new(format!("day-{}", order + 1), "Day", order);
            state.segment_order.push(segment.id.clone());
            state.segments.insert(segment.id.clone(), segment);
        }
        state
    }

    fn history() -> History {
        History::new(with_segments(0), HistoryCapacity::default())
    }

    #[test]
    fn recording_after_undo_discards_redo_stack() {
        let mut history = history();
        history.record(&with_segments(1));
        history.record(&with_segments(2));
        assert_eq!(history.len(), 3);

        assert_eq!(history.undo(), Some(with_segments(1)));
        assert_eq!(history.index(), 1);

        let branch = {
            let mut state = with_segments(1);
            state.is_multi_select_mode = true;
            state
        };
        assert!(history.record(&branch));

        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current(), Some(&branch));
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_redo_respect_history_bounds() {
        let mut history = history();
        history.record(&with_segments(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert!(history.undo().is_some());
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);

        assert_eq!(history.redo(), Some(with_segments(1)));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn identical_snapshots_are_recorded_once() {
        let mut history = history();
        assert!(history.record(&with_segments(1)));
        assert!(!history.record(&with_segments(1)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn oldest_entries_are_evicted_past_capacity() {
        let capacity = HistoryCapacity::new(10);
        let mut history = History::new(with_segments(0), capacity);
        for count in 1..=25 {
            history.record(&with_segments(count));
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.index(), 9);
        assert_eq!(history.current(), Some(&with_segments(25)));

        let mut undone = 0;
        while history.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, 9);
        assert_eq!(history.current(), Some(&with_segments(16)));
    }

    #[test]
    fn reset_starts_over() {
        let mut history = history();
        history.record(&with_segments(1));
        history.reset(with_segments(3));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert_eq!(history.current(), Some(&with_segments(3)));
    }
}
