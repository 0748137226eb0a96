// SPDX-License-Identifier: MPL-2.0
//! Selection phases and rectangular multi-select.
//!
//! Sticker coordinates are relative to their segment. A [`CanvasLayout`]
//! places segments on the shared canvas so that a selection box drawn in
//! canvas space can be tested against stickers from every segment.

use super::action::Action;
use super::state::MoodboardState;
use crate::config::{CanvasConfig, DEFAULT_SEGMENT_GAP};
use crate::domain::board::{SegmentId, Sticker, StickerId};
use kurbo::{Point, Rect};

// =============================================================================
// Layout
// =============================================================================

/// Maps segments onto the shared canvas.
pub trait CanvasLayout {
    /// Top-left corner of a segment in canvas space.
    fn segment_origin(&self, state: &MoodboardState, segment: &SegmentId) -> Option<Point>;

    /// Canvas-space bounds of a segment.
    fn segment_bounds(&self, state: &MoodboardState, segment: &SegmentId) -> Option<Rect> {
        let origin = self.segment_origin(state, segment)?;
        let segment = state.segments.get(segment)?;
        Some(Rect::from_origin_size(origin, (segment.width, segment.height)))
    }

    /// Canvas-space bounding box of a sticker, rotation included.
    fn sticker_bounds(&self, state: &MoodboardState, sticker: &Sticker) -> Option<Rect> {
        let origin = self.segment_origin(state, &sticker.time_segment_id)?;
        Some(sticker.rotated_bounds() + origin.to_vec2())
    }

    /// Segment whose bounds contain `point`, if any.
    fn segment_at(&self, state: &MoodboardState, point: Point) -> Option<SegmentId> {
        state.segment_order.iter().find_map(|id| {
            self.segment_bounds(state, id)
                .filter(|bounds| bounds.contains(point))
                .map(|_| id.clone())
        })
    }
}

/// Segments side by side, left to right in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedLayout {
    gap: f64,
}

impl StackedLayout {
    #[must_use]
    pub fn new(gap: f64) -> Self {
        Self {
            gap: if gap.is_finite() { gap.max(0.0) } else { 0.0 },
        }
    }

    #[must_use]
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.segment_gap.unwrap_or(DEFAULT_SEGMENT_GAP))
    }

    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }
}

impl Default for StackedLayout {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_GAP)
    }
}

impl CanvasLayout for StackedLayout {
    fn segment_origin(&self, state: &MoodboardState, segment: &SegmentId) -> Option<Point> {
        let mut x = 0.0;
        for id in &state.segment_order {
            let current = state.segments.get(id)?;
            if id == segment {
                return Some(Point::new(x, 0.0));
            }
            x += current.width + self.gap;
        }
        None
    }
}

// =============================================================================
// Hit testing
// =============================================================================

/// Overlap test that excludes rectangles which merely touch.
#[must_use]
pub fn overlaps_strictly(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Stickers whose canvas bounds strictly overlap `area`, in display order.
pub fn stickers_in_rect(
    state: &MoodboardState,
    layout: &impl CanvasLayout,
    area: Rect,
) -> Vec<StickerId> {
    let area = area.abs();
    let mut hits: Vec<&Sticker> = state
        .stickers
        .values()
        .filter(|sticker| {
            layout
                .sticker_bounds(state, sticker)
                .is_some_and(|bounds| overlaps_strictly(bounds, area))
        })
        .collect();
    hits.sort_by_key(|sticker| {
        let segment = state
            .segment_order
            .iter()
            .position(|id| id == &sticker.time_segment_id);
        (segment, sticker.z_index)
    });
    hits.into_iter().map(|sticker| sticker.id.clone()).collect()
}

/// Topmost sticker under `point`.
pub fn sticker_at<'a>(
    state: &'a MoodboardState,
    layout: &impl CanvasLayout,
    point: Point,
) -> Option<&'a Sticker> {
    state
        .stickers
        .values()
        .filter(|sticker| {
            layout
                .sticker_bounds(state, sticker)
                .is_some_and(|bounds| bounds.contains(point))
        })
        .max_by_key(|sticker| sticker.z_index)
}

// =============================================================================
// Selection phases
// =============================================================================

/// What the selection is doing right now.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPhase {
    Idle,
    SingleSelected(StickerId),
    MultiSelected(Vec<StickerId>),
    /// A selection rectangle is being drawn from this canvas point.
    DrawingSelectionBox(Point),
}

impl SelectionPhase {
    /// Derives the phase from the board and the in-progress box, if any.
    #[must_use]
    pub fn of(state: &MoodboardState, selection_box: &SelectionBox) -> Self {
        if let Some(anchor) = selection_box.anchor {
            return SelectionPhase::DrawingSelectionBox(anchor);
        }
        match state.selected_sticker_ids.as_slice() {
            [] => SelectionPhase::Idle,
            [only] if !state.is_multi_select_mode => SelectionPhase::SingleSelected(only.clone()),
            ids => SelectionPhase::MultiSelected(ids.to_vec()),
        }
    }
}

/// Rectangle-drag gesture for multi-select mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionBox {
    anchor: Option<Point>,
    cursor: Point,
}

impl SelectionBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts drawing if multi-select is on, nothing is being dragged and
    /// the pointer landed on empty canvas. Returns whether drawing started.
    pub fn pointer_down(
        &mut self,
        state: &MoodboardState,
        layout: &impl CanvasLayout,
        point: Point,
    ) -> bool {
        if !state.is_multi_select_mode || state.is_dragging {
            return false;
        }
        if sticker_at(state, layout, point).is_some() {
            return false;
        }
        self.anchor = Some(point);
        self.cursor = point;
        true
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.anchor.is_some() {
            self.cursor = point;
        }
    }

    /// Finishes drawing and returns the bulk selection to dispatch.
    pub fn pointer_up(
        &mut self,
        state: &MoodboardState,
        layout: &impl CanvasLayout,
        point: Point,
    ) -> Option<Action> {
        let anchor = self.anchor.take()?;
        if state.is_dragging {
            return None;
        }
        let area = Rect::from_points(anchor, point);
        Some(Action::SelectStickers {
            sticker_ids: stickers_in_rect(state, layout, area),
        })
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Rectangle drawn so far, for rendering.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.anchor
            .map(|anchor| Rect::from_points(anchor, self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::reduce;
    use crate::domain::board::{StickerDraft, TimeSegment};

    fn board() -> MoodboardState {
        let mut state = MoodboardState::default();
        let day_two = TimeSegment::new("day-2", "Day 2", 1).sized(400.0, 300.0);
        state = reduce(&state, Action::AddSegment { segment: day_two }).unwrap();
        for (id, segment, x) in [("a", "day-1", 0.0), ("b", "day-1", 200.0), ("c", "day-2", 0.0)] {
            state = reduce(
                &state,
                Action::AddSticker {
                    sticker: StickerDraft::text(id, segment, id)
                        .at(x, 0.0)
                        .sized(100.0, 50.0),
                },
            )
            .unwrap();
        }
        reduce(&state, Action::SetMultiSelectMode { enabled: true }).unwrap()
    }

    #[test]
    fn touching_edges_do_not_count() {
        let sticker = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(!overlaps_strictly(sticker, Rect::new(100.0, 0.0, 150.0, 50.0)));
        assert!(!overlaps_strictly(sticker, Rect::new(0.0, 50.0, 100.0, 80.0)));
        assert!(overlaps_strictly(sticker, Rect::new(99.0, 49.0, 150.0, 80.0)));
    }

    #[test]
    fn stacked_layout_places_segments_left_to_right() {
        let state = board();
        let layout = StackedLayout::new(48.0);
        assert_eq!(
            layout.segment_origin(&state, &"day-2".into()),
            Some(Point::new(848.0, 0.0))
        );
        assert_eq!(layout.segment_origin(&state, &"nope".into()), None);
        assert_eq!(
            layout.segment_at(&state, Point::new(900.0, 10.0)),
            Some(SegmentId::new("day-2"))
        );
        assert_eq!(layout.segment_at(&state, Point::new(820.0, 10.0)), None);
    }

    #[test]
    fn drawn_box_selects_across_segments() {
        let state = board();
        let layout = StackedLayout::default();
        let mut selection = SelectionBox::new();

        assert!(selection.pointer_down(&state, &layout, Point::new(150.0, 10.0)));
        selection.pointer_move(Point::new(900.0, 20.0));
        assert!(matches!(
            SelectionPhase::of(&state, &selection),
            SelectionPhase::DrawingSelectionBox(_)
        ));

        let action = selection
            .pointer_up(&state, &layout, Point::new(900.0, 20.0))
            .expect("selection action");
        assert_eq!(
            action,
            Action::SelectStickers {
                sticker_ids: vec!["b".into(), "c".into()]
            }
        );
        assert!(!selection.is_drawing());
    }

    #[test]
    fn box_touching_sticker_edge_selects_nothing() {
        let state = board();
        let layout = StackedLayout::default();
        let mut selection = SelectionBox::new();
        // "a" spans x 0..100; box starts exactly at its right edge.
        assert!(selection.pointer_down(&state, &layout, Point::new(100.0, 60.0)));
        let action = selection.pointer_up(&state, &layout, Point::new(190.0, 0.0));
        assert_eq!(
            action,
            Some(Action::SelectStickers {
                sticker_ids: vec![]
            })
        );
    }

    #[test]
    fn box_requires_multi_select_and_empty_canvas() {
        let state = board();
        let layout = StackedLayout::default();
        let mut selection = SelectionBox::new();
        assert!(!selection.pointer_down(&state, &layout, Point::new(10.0, 10.0)));

        let single = reduce(&state, Action::SetMultiSelectMode { enabled: false }).unwrap();
        assert!(!selection.pointer_down(&single, &layout, Point::new(500.0, 500.0)));

        let dragging = reduce(&state, Action::SetDragging { dragging: true }).unwrap();
        assert!(!selection.pointer_down(&dragging, &layout, Point::new(500.0, 500.0)));
        assert_eq!(selection.rect(), None);
    }

    #[test]
    fn cancel_discards_the_box() {
        let state = board();
        let layout = StackedLayout::default();
        let mut selection = SelectionBox::new();
        selection.pointer_down(&state, &layout, Point::new(500.0, 500.0));
        selection.cancel();
        assert_eq!(selection.pointer_up(&state, &layout, Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn phase_tracks_selection_size_and_mode() {
        let state = board();
        let idle = SelectionBox::new();
        assert_eq!(SelectionPhase::of(&state, &idle), SelectionPhase::Idle);

        let single = reduce(&state, Action::SetMultiSelectMode { enabled: false }).unwrap();
        let single = reduce(&single, Action::SelectSticker { id: "a".into() }).unwrap();
        assert_eq!(
            SelectionPhase::of(&single, &idle),
            SelectionPhase::SingleSelected("a".into())
        );

        let multi = reduce(&state, Action::SelectSticker { id: "a".into() }).unwrap();
        let multi = reduce(&multi, Action::SelectSticker { id: "c".into() }).unwrap();
        assert_eq!(
            SelectionPhase::of(&multi, &idle),
            SelectionPhase::MultiSelected(vec!["a".into(), "c".into()])
        );
    }
}
