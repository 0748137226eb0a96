// SPDX-License-Identifier: MPL-2.0
//! Root board aggregate and its cross-reference invariants.
//!
//! [`MoodboardState`] is never mutated in place by callers: every change is a
//! new value produced by [`reduce`](super::reducer::reduce). The invariants
//! checked by [`MoodboardState::validate`] are:
//!
//! - `segment_order` is a permutation of the keys of `segments`;
//! - every sticker's `time_segment_id` names an existing segment;
//! - group membership is bidirectional: a sticker listed by a group carries
//!   that group's id, and a sticker carrying a group id is listed by it;
//! - `selected_sticker_ids` holds distinct, existing stickers, mirrored by
//!   each sticker's `is_selected` flag;
//! - every map is keyed by its entity's own id.

use crate::config::{SEEDED_SEGMENT_ID, SEEDED_SEGMENT_TITLE};
use crate::domain::board::{
    GroupId, SegmentId, Sticker, StickerGroup, StickerId, StickerTemplate, TimeSegment,
};
use crate::error::StateError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Complete board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodboardState {
    pub segments: BTreeMap<SegmentId, TimeSegment>,
    pub stickers: BTreeMap<StickerId, Sticker>,
    /// Display order of segments; secondary index over `segments`.
    pub segment_order: Vec<SegmentId>,
    #[serde(default)]
    pub sticker_groups: BTreeMap<GroupId, StickerGroup>,
    /// Ordered set of selected stickers.
    #[serde(default)]
    pub selected_sticker_ids: Vec<StickerId>,
    #[serde(default)]
    pub is_dragging: bool,
    #[serde(default)]
    pub is_multi_select_mode: bool,
    #[serde(default)]
    pub templates: BTreeMap<String, StickerTemplate>,
}

impl Default for MoodboardState {
    /// A fresh board with a single "Day 1" segment.
    fn default() -> Self {
        let mut state = Self::empty();
        let segment = TimeSegment::new(SEEDED_SEGMENT_ID, SEEDED_SEGMENT_TITLE, 0);
        state.segment_order.push(segment.id.clone());
        state.segments.insert(segment.id.clone(), segment);
        state
    }
}

impl MoodboardState {
    /// A board with no segments at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            segments: BTreeMap::new(),
            stickers: BTreeMap::new(),
            segment_order: Vec::new(),
            sticker_groups: BTreeMap::new(),
            selected_sticker_ids: Vec::new(),
            is_dragging: false,
            is_multi_select_mode: false,
            templates: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn segment(&self, id: &str) -> Option<&TimeSegment> {
        self.segments.get(id)
    }

    #[must_use]
    pub fn sticker(&self, id: &str) -> Option<&Sticker> {
        self.stickers.get(id)
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&StickerGroup> {
        self.sticker_groups.get(id)
    }

    /// Stickers owned by `segment`, in id order.
    pub fn stickers_in<'a>(&'a self, segment: &'a SegmentId) -> impl Iterator<Item = &'a Sticker> {
        self.stickers
            .values()
            .filter(move |sticker| &sticker.time_segment_id == segment)
    }

    #[must_use]
    pub fn is_selected(&self, id: &StickerId) -> bool {
        self.selected_sticker_ids.contains(id)
    }

    /// Brings every sticker's `is_selected` flag in line with the selection.
    pub(crate) fn sync_selection_flags(&mut self) {
        let selected: BTreeSet<&StickerId> = self.selected_sticker_ids.iter().collect();
        for (id, sticker) in &mut self.stickers {
            sticker.is_selected = selected.contains(id);
        }
    }

    /// Checks every cross-reference invariant.
    pub fn validate(&self) -> Result<(), StateError> {
        let inconsistent = |message: String| Err(StateError::Inconsistent(message));

        for (key, segment) in &self.segments {
            if key != &segment.id {
                return inconsistent(format!("segment keyed '{key}' has id '{}'", segment.id));
            }
        }
        for (key, sticker) in &self.stickers {
            if key != &sticker.id {
                return inconsistent(format!("sticker keyed '{key}' has id '{}'", sticker.id));
            }
        }
        for (key, group) in &self.sticker_groups {
            if key != &group.id {
                return inconsistent(format!("group keyed '{key}' has id '{}'", group.id));
            }
        }
        for (key, template) in &self.templates {
            if key != &template.name {
                return inconsistent(format!(
                    "template keyed '{key}' is named '{}'",
                    template.name
                ));
            }
        }

        let ordered: BTreeSet<&SegmentId> = self.segment_order.iter().collect();
        if ordered.len() != self.segment_order.len()
            || ordered.len() != self.segments.len()
            || !ordered.iter().all(|id| self.segments.contains_key(*id))
        {
            return inconsistent("segment order is not a permutation of segments".into());
        }

        for sticker in self.stickers.values() {
            if !self.segments.contains_key(&sticker.time_segment_id) {
                return Err(StateError::UnknownSegment(
                    sticker.time_segment_id.to_string(),
                ));
            }
            if let Some(group_id) = &sticker.group_id {
                let listed = self
                    .sticker_groups
                    .get(group_id)
                    .is_some_and(|group| group.contains(&sticker.id));
                if !listed {
                    return inconsistent(format!(
                        "sticker '{}' points at group '{group_id}' which does not list it",
                        sticker.id
                    ));
                }
            }
        }

        for group in self.sticker_groups.values() {
            let mut seen = BTreeSet::new();
            for member in &group.sticker_ids {
                if !seen.insert(member) {
                    return inconsistent(format!("group '{}' lists '{member}' twice", group.id));
                }
                match self.stickers.get(member) {
                    Some(sticker) if sticker.group_id.as_ref() == Some(&group.id) => {}
                    Some(_) => {
                        return inconsistent(format!(
                            "group '{}' lists '{member}' without a back-reference",
                            group.id
                        ));
                    }
                    None => {
                        return inconsistent(format!(
                            "group '{}' lists missing sticker '{member}'",
                            group.id
                        ));
                    }
                }
            }
        }

        let mut seen = BTreeSet::new();
        for id in &self.selected_sticker_ids {
            if !seen.insert(id) {
                return inconsistent(format!("sticker '{id}' selected twice"));
            }
            if !self.stickers.contains_key(id) {
                return inconsistent(format!("selected sticker '{id}' does not exist"));
            }
        }
        if let Some(sticker) = self
            .stickers
            .values()
            .find(|sticker| sticker.is_selected != seen.contains(&sticker.id))
        {
            return inconsistent(format!(
                "sticker '{}' selection flag disagrees with the selection",
                sticker.id
            ));
        }

        Ok(())
    }

    /// Returns a copy with every violated invariant repaired, plus a
    /// description of each repair.
    ///
    /// Dangling stickers are dropped, the segment order is rebuilt as a
    /// permutation, groups win over stale back-references, and the
    /// selection is filtered to existing stickers.
    #[must_use]
    pub fn repaired(&self) -> (MoodboardState, Vec<String>) {
        let mut fixes = Vec::new();
        let mut next = MoodboardState {
            is_dragging: false,
            is_multi_select_mode: self.is_multi_select_mode,
            ..MoodboardState::empty()
        };
        if self.is_dragging {
            fixes.push("cleared stale drag flag".to_string());
        }

        for (key, segment) in &self.segments {
            if key != &segment.id {
                fixes.push(format!("re-keyed segment '{key}' as '{}'", segment.id));
            }
            next.segments.insert(segment.id.clone(), segment.clone());
        }
        for (key, template) in &self.templates {
            if key != &template.name {
                fixes.push(format!("re-keyed template '{key}' as '{}'", template.name));
            }
            next.templates.insert(template.name.clone(), template.clone());
        }

        let segment_ids: BTreeSet<SegmentId> = next.segments.keys().cloned().collect();
        for segment in next.segments.values_mut() {
            if segment
                .parent_id
                .as_ref()
                .is_some_and(|parent| !segment_ids.contains(parent))
            {
                fixes.push(format!("cleared dangling parent of segment '{}'", segment.id));
                segment.parent_id = None;
            }
            let before = segment.children_ids.len();
            segment.children_ids.retain(|child| segment_ids.contains(child));
            if segment.children_ids.len() != before {
                fixes.push(format!("dropped dangling children of segment '{}'", segment.id));
            }
        }

        for (key, sticker) in &self.stickers {
            if !next.segments.contains_key(&sticker.time_segment_id) {
                fixes.push(format!(
                    "dropped sticker '{}' owned by missing segment '{}'",
                    sticker.id, sticker.time_segment_id
                ));
                continue;
            }
            if key != &sticker.id {
                fixes.push(format!("re-keyed sticker '{key}' as '{}'", sticker.id));
            }
            let mut sticker = sticker.clone();
            sticker.normalize_geometry();
            next.stickers.insert(sticker.id.clone(), sticker);
        }

        let mut placed = BTreeSet::new();
        for id in &self.segment_order {
            if next.segments.contains_key(id) && placed.insert(id.clone()) {
                next.segment_order.push(id.clone());
            }
        }
        let mut missing: Vec<&TimeSegment> = next
            .segments
            .values()
            .filter(|segment| !placed.contains(&segment.id))
            .collect();
        missing.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        let rebuilt = next.segment_order.len() != self.segment_order.len() || !missing.is_empty();
        next.segment_order
            .extend(missing.into_iter().map(|segment| segment.id.clone()));
        if rebuilt {
            fixes.push("rebuilt segment order".to_string());
        }

        let mut owner: BTreeMap<StickerId, GroupId> = BTreeMap::new();
        for (key, group) in &self.sticker_groups {
            if key != &group.id {
                fixes.push(format!("re-keyed group '{key}' as '{}'", group.id));
            }
            let mut group = group.clone();
            let before = group.sticker_ids.len();
            let mut members = Vec::with_capacity(before);
            for member in group.sticker_ids.drain(..) {
                if next.stickers.contains_key(&member) && !owner.contains_key(&member) {
                    owner.insert(member.clone(), group.id.clone());
                    members.push(member);
                }
            }
            if members.len() != before {
                fixes.push(format!("dropped invalid members of group '{}'", group.id));
            }
            group.sticker_ids = members;
            next.sticker_groups.insert(group.id.clone(), group);
        }
        for sticker in next.stickers.values_mut() {
            let expected = owner.get(&sticker.id).cloned();
            if sticker.group_id != expected {
                fixes.push(format!("relinked group of sticker '{}'", sticker.id));
                sticker.group_id = expected;
            }
        }

        let mut selected = BTreeSet::new();
        for id in &self.selected_sticker_ids {
            if next.stickers.contains_key(id) && selected.insert(id.clone()) {
                next.selected_sticker_ids.push(id.clone());
            }
        }
        if next.selected_sticker_ids.len() != self.selected_sticker_ids.len() {
            fixes.push("dropped invalid selection entries".to_string());
        }
        next.sync_selection_flags();

        for fix in &fixes {
            tracing::warn!(repair = %fix, "repaired board state");
        }
        (next, fixes)
    }
}
