// SPDX-License-Identifier: MPL-2.0
//! Drag, resize and rotate gestures.
//!
//! A gesture runs `start` → `update`* → `stop` (or `cancel`). Intermediate
//! frames only produce preview stickers for rendering; the board is not
//! touched until `stop` returns an action. A move or rotate released away
//! from every segment yields no action, which leaves the sticker where it
//! started.

use super::action::{Action, StickerMove};
use super::selection::CanvasLayout;
use super::state::MoodboardState;
use crate::domain::board::{
    clamp_position, clamp_size, normalize_rotation, SegmentId, Sticker, StickerId,
};
use kurbo::{Point, Vec2};

/// Kind of manipulation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    /// Drags the bottom-right corner.
    Resize,
    Rotate,
}

/// An in-flight manipulation of one or more stickers.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    kind: GestureKind,
    primary: StickerId,
    pointer_start: Point,
    pointer: Point,
    /// Canvas-space pivot for rotation.
    pivot: Point,
    originals: Vec<Sticker>,
    preview: Vec<Sticker>,
}

impl Gesture {
    /// Starts moving `id`. When `id` is part of a multi-selection the whole
    /// selection moves with it.
    pub fn start_move(state: &MoodboardState, id: &StickerId, pointer: Point) -> Option<Self> {
        let primary = state.stickers.get(id)?;
        let mut originals = vec![primary.clone()];
        if state.selected_sticker_ids.len() > 1 && state.is_selected(id) {
            originals.extend(
                state
                    .selected_sticker_ids
                    .iter()
                    .filter(|selected| *selected != id)
                    .filter_map(|selected| state.stickers.get(selected))
                    .cloned(),
            );
        }
        Some(Self::new(GestureKind::Move, originals, pointer, Point::ZERO))
    }

    pub fn start_resize(state: &MoodboardState, id: &StickerId, pointer: Point) -> Option<Self> {
        let sticker = state.stickers.get(id)?.clone();
        Some(Self::new(GestureKind::Resize, vec![sticker], pointer, Point::ZERO))
    }

    pub fn start_rotate(
        state: &MoodboardState,
        layout: &impl CanvasLayout,
        id: &StickerId,
        pointer: Point,
    ) -> Option<Self> {
        let sticker = state.stickers.get(id)?.clone();
        let origin = layout.segment_origin(state, &sticker.time_segment_id)?;
        let pivot = sticker.center() + origin.to_vec2();
        Some(Self::new(GestureKind::Rotate, vec![sticker], pointer, pivot))
    }

    fn new(kind: GestureKind, originals: Vec<Sticker>, pointer: Point, pivot: Point) -> Self {
        Self {
            kind,
            primary: originals[0].id.clone(),
            pointer_start: pointer,
            pointer,
            pivot,
            preview: originals.clone(),
            originals,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Stickers affected by the gesture, as they looked when it started.
    #[must_use]
    pub fn originals(&self) -> &[Sticker] {
        &self.originals
    }

    /// Feeds a pointer position and returns the preview to render.
    pub fn update(&mut self, pointer: Point) -> &[Sticker] {
        self.pointer = pointer;
        let delta = pointer - self.pointer_start;
        let turn = self.turn_degrees();
        self.preview = self
            .originals
            .iter()
            .map(|original| {
                let mut sticker = original.clone();
                match self.kind {
                    GestureKind::Move => {
                        sticker.x = clamp_position(original.x + delta.x);
                        sticker.y = clamp_position(original.y + delta.y);
                    }
                    GestureKind::Resize => {
                        sticker.width = clamp_size(original.width + delta.x);
                        sticker.height = clamp_size(original.height + delta.y);
                    }
                    GestureKind::Rotate => {
                        sticker.rotation = normalize_rotation(original.rotation + turn);
                    }
                }
                sticker
            })
            .collect();
        &self.preview
    }

    /// Preview of the latest frame.
    #[must_use]
    pub fn preview(&self) -> &[Sticker] {
        &self.preview
    }

    /// Ends the gesture and returns the action that commits it, if any.
    pub fn stop(
        mut self,
        state: &MoodboardState,
        layout: &impl CanvasLayout,
        pointer: Point,
    ) -> Option<Action> {
        self.update(pointer);
        match self.kind {
            GestureKind::Move => self.commit_move(state, layout, pointer),
            GestureKind::Resize => {
                let (original, preview) = (self.originals.first()?, self.preview.first()?);
                let unchanged =
                    original.width == preview.width && original.height == preview.height;
                (!unchanged).then(|| Action::ResizeSticker {
                    id: self.primary.clone(),
                    width: preview.width,
                    height: preview.height,
                })
            }
            GestureKind::Rotate => {
                layout.segment_at(state, pointer)?;
                let (original, preview) = (self.originals.first()?, self.preview.first()?);
                (original.rotation != preview.rotation).then(|| Action::RotateSticker {
                    id: self.primary.clone(),
                    rotation: preview.rotation,
                })
            }
        }
    }

    /// Abandons the gesture. Nothing is committed.
    pub fn cancel(self) {
        tracing::debug!(kind = ?self.kind, sticker = %self.primary, "gesture cancelled");
    }

    fn turn_degrees(&self) -> f64 {
        if self.kind != GestureKind::Rotate {
            return 0.0;
        }
        let angle = |point: Point| {
            let Vec2 { x, y } = point - self.pivot;
            y.atan2(x)
        };
        (angle(self.pointer) - angle(self.pointer_start)).to_degrees()
    }

    fn commit_move(
        &self,
        state: &MoodboardState,
        layout: &impl CanvasLayout,
        pointer: Point,
    ) -> Option<Action> {
        let drop_target = layout.segment_at(state, pointer)?;
        let delta = pointer - self.pointer_start;

        let mut moves = Vec::with_capacity(self.originals.len());
        for original in &self.originals {
            let from = layout.segment_origin(state, &original.time_segment_id)?;
            let top_left = Point::new(original.x, original.y) + from.to_vec2() + delta;
            let center = top_left + Vec2::new(original.width / 2.0, original.height / 2.0);
            let target: SegmentId = layout
                .segment_at(state, center)
                .unwrap_or_else(|| drop_target.clone());
            let to = layout.segment_origin(state, &target)?;
            let local = top_left - to.to_vec2();
            moves.push(StickerMove {
                id: original.id.clone(),
                x: clamp_position(local.x),
                y: clamp_position(local.y),
                time_segment_id: target,
            });
        }

        let unchanged = moves.iter().zip(&self.originals).all(|(moved, original)| {
            moved.x == original.x
                && moved.y == original.y
                && moved.time_segment_id == original.time_segment_id
        });
        if unchanged {
            return None;
        }

        if moves.len() == 1 {
            let StickerMove {
                id,
                x,
                y,
                time_segment_id,
            } = moves.remove(0);
            Some(Action::MoveSticker {
                id,
                x,
                y,
                time_segment_id,
            })
        } else {
            Some(Action::MoveStickers { moves })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::reduce;
    use crate::app::selection::StackedLayout;
    use crate::domain::board::{StickerDraft, TimeSegment};

    fn board() -> MoodboardState {
        let mut state = reduce(
            &MoodboardState::default(),
            Action::AddSegment {
                segment: TimeSegment::new("day-2", "Day 2", 1),
            },
        )
        .unwrap();
        for (id, x) in [("a", 10.0), ("b", 300.0)] {
            state = reduce(
                &state,
                Action::AddSticker {
                    sticker: StickerDraft::text(id, "day-1", id)
                        .at(x, 10.0)
                        .sized(100.0, 100.0),
                },
            )
            .unwrap();
        }
        state
    }

    #[test]
    fn move_preview_does_not_touch_the_board() {
        let state = board();
        let before = state.clone();
        let mut gesture = Gesture::start_move(&state, &"a".into(), Point::new(50.0, 50.0)).unwrap();
        let preview = gesture.update(Point::new(80.0, 70.0));
        assert_eq!((preview[0].x, preview[0].y), (40.0, 30.0));
        assert_eq!(state, before);
    }

    #[test]
    fn move_commits_on_stop() {
        let state = board();
        let layout = StackedLayout::default();
        let gesture = Gesture::start_move(&state, &"a".into(), Point::new(50.0, 50.0)).unwrap();
        let action = gesture.stop(&state, &layout, Point::new(60.0, 90.0));
        assert_eq!(
            action,
            Some(Action::MoveSticker {
                id: "a".into(),
                x: 20.0,
                y: 50.0,
                time_segment_id: "day-1".into(),
            })
        );
    }

    #[test]
    fn dropping_onto_another_segment_changes_owner() {
        let state = board();
        let layout = StackedLayout::default();
        let gesture = Gesture::start_move(&state, &"a".into(), Point::new(50.0, 50.0)).unwrap();
        // day-2 starts at x = 848.
        let action = gesture
            .stop(&state, &layout, Point::new(950.0, 50.0))
            .expect("move action");
        match action {
            Action::MoveSticker {
                x, time_segment_id, ..
            } => {
                assert_eq!(time_segment_id, SegmentId::new("day-2"));
                assert_eq!(x, 62.0);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn dropping_outside_every_segment_commits_nothing() {
        let state = board();
        let layout = StackedLayout::default();
        let gesture = Gesture::start_move(&state, &"a".into(), Point::new(50.0, 50.0)).unwrap();
        assert_eq!(gesture.stop(&state, &layout, Point::new(50.0, 5000.0)), None);
    }

    #[test]
    fn dragging_a_multi_selection_moves_every_member() {
        let state = reduce(&board(), Action::SetMultiSelectMode { enabled: true }).unwrap();
        let state = reduce(
            &state,
            Action::SelectStickers {
                sticker_ids: vec!["a".into(), "b".into()],
            },
        )
        .unwrap();
        let layout = StackedLayout::default();
        let gesture = Gesture::start_move(&state, &"b".into(), Point::new(350.0, 50.0)).unwrap();
        assert_eq!(gesture.originals().len(), 2);

        let action = gesture.stop(&state, &layout, Point::new(360.0, 60.0));
        match action {
            Some(Action::MoveStickers { moves }) => {
                assert_eq!(moves.len(), 2);
                assert!(moves.iter().all(|m| m.y == 20.0));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn resize_clamps_to_minimum_edge() {
        let state = board();
        let layout = StackedLayout::default();
        let gesture =
            Gesture::start_resize(&state, &"a".into(), Point::new(110.0, 110.0)).unwrap();
        let action = gesture.stop(&state, &layout, Point::new(0.0, 160.0));
        assert_eq!(
            action,
            Some(Action::ResizeSticker {
                id: "a".into(),
                width: 44.0,
                height: 150.0,
            })
        );
    }

    #[test]
    fn rotate_follows_pointer_angle() {
        let state = board();
        let layout = StackedLayout::default();
        // Center of "a" is (60, 60).
        let gesture =
            Gesture::start_rotate(&state, &layout, &"a".into(), Point::new(160.0, 60.0)).unwrap();
        let action = gesture
            .stop(&state, &layout, Point::new(60.0, 160.0))
            .expect("rotate action");
        match action {
            Action::RotateSticker { rotation, .. } => assert!((rotation - 90.0).abs() < 1e-9),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn unchanged_gestures_commit_nothing() {
        let state = board();
        let layout = StackedLayout::default();
        let gesture = Gesture::start_move(&state, &"a".into(), Point::new(50.0, 50.0)).unwrap();
        assert_eq!(gesture.stop(&state, &layout, Point::new(50.0, 50.0)), None);
    }
}
