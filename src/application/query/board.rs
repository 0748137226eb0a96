// SPDX-License-Identifier: MPL-2.0
//! Read-only views over a board.

use crate::app::state::MoodboardState;
use crate::domain::board::{GroupId, SegmentId, Sticker, StickerType, TimeSegment};
use std::collections::BTreeMap;
use std::fmt;

/// Segments in display order.
pub fn segments_in_order(state: &MoodboardState) -> Vec<&TimeSegment> {
    state
        .segment_order
        .iter()
        .filter_map(|id| state.segments.get(id))
        .collect()
}

/// Stickers owned by `segment`, bottom to top (ties broken by id).
pub fn stickers_in_segment<'a>(state: &'a MoodboardState, segment: &SegmentId) -> Vec<&'a Sticker> {
    let mut stickers: Vec<&Sticker> = state
        .stickers
        .values()
        .filter(|sticker| &sticker.time_segment_id == segment)
        .collect();
    stickers.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
    stickers
}

/// Members of a group in the group's own order. Empty for unknown groups.
pub fn group_members<'a>(state: &'a MoodboardState, group: &GroupId) -> Vec<&'a Sticker> {
    state
        .sticker_groups
        .get(group)
        .map(|group| {
            group
                .sticker_ids
                .iter()
                .filter_map(|id| state.stickers.get(id))
                .collect()
        })
        .unwrap_or_default()
}

/// Selected stickers in selection order.
pub fn selected_stickers(state: &MoodboardState) -> Vec<&Sticker> {
    state
        .selected_sticker_ids
        .iter()
        .filter_map(|id| state.stickers.get(id))
        .collect()
}

/// Per-segment line of a [`BoardSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub id: SegmentId,
    pub title: String,
    pub sticker_count: usize,
}

/// Counts describing a board at a glance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardSummary {
    pub segments: Vec<SegmentSummary>,
    pub sticker_count: usize,
    pub stickers_by_type: BTreeMap<&'static str, usize>,
    pub group_count: usize,
    pub template_count: usize,
    pub selected_count: usize,
}

/// Summarizes `state`.
pub fn board_summary(state: &MoodboardState) -> BoardSummary {
    let segments = segments_in_order(state)
        .into_iter()
        .map(|segment| SegmentSummary {
            id: segment.id.clone(),
            title: segment.title.clone(),
            sticker_count: state.stickers_in(&segment.id).count(),
        })
        .collect();

    let mut stickers_by_type = BTreeMap::new();
    for sticker in state.stickers.values() {
        *stickers_by_type
            .entry(sticker.sticker_type().as_str())
            .or_insert(0) += 1;
    }

    BoardSummary {
        segments,
        sticker_count: state.stickers.len(),
        stickers_by_type,
        group_count: state.sticker_groups.len(),
        template_count: state.templates.len(),
        selected_count: state.selected_sticker_ids.len(),
    }
}

impl BoardSummary {
    /// Count of stickers of one type.
    #[must_use]
    pub fn count_of(&self, sticker_type: StickerType) -> usize {
        self.stickers_by_type
            .get(sticker_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}

impl fmt::Display for BoardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            writeln!(
                f,
                "{:<16} {:<24} {:>4} stickers",
                segment.id, segment.title, segment.sticker_count
            )?;
        }
        write!(
            f,
            "{} segments, {} stickers, {} groups, {} templates",
            self.segments.len(),
            self.sticker_count,
            self.group_count,
            self.template_count
        )
    }
}
