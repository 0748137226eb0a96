// SPDX-License-Identifier: MPL-2.0
//! Pure state transition function.
//!
//! [`reduce`] never mutates its input: it works on a clone and either returns
//! the finished clone or an error, so a rejected action leaves the board
//! exactly as it was. Targeted updates naming an absent entity are no-ops.

use super::action::{Action, StickerMove};
use super::state::MoodboardState;
use crate::domain::board::{
    clamp_position, clamp_size, clamp_z_index, normalize_rotation, GroupId, SegmentId,
    StickerDraft, StickerGroup, StickerId, StickerKind, TimeSegment,
};
use crate::error::{EntityKind, Result, StateError};
use std::collections::BTreeSet;

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &MoodboardState, action: Action) -> Result<MoodboardState> {
    let name = action.name();
    let mut next = state.clone();
    match apply(&mut next, action) {
        Ok(()) => {
            next.sync_selection_flags();
            Ok(next)
        }
        Err(err) => {
            tracing::warn!(action = name, error = %err, "rejected action");
            Err(err)
        }
    }
}

fn apply(state: &mut MoodboardState, action: Action) -> Result<()> {
    if state.is_dragging && action.is_selection() {
        tracing::debug!(action = action.name(), "ignoring selection change during drag");
        return Ok(());
    }

    match action {
        Action::AddSegment { segment } => add_segment(state, segment),
        Action::RemoveSegment { id } => {
            remove_segment(state, &id);
            Ok(())
        }
        Action::RenameSegment { id, title } => {
            if let Some(segment) = state.segments.get_mut(&id) {
                segment.title = title;
            }
            Ok(())
        }
        Action::ResizeSegment { id, width, height } => {
            if let Some(segment) = state.segments.get_mut(&id) {
                segment.width = clamp_size(width);
                segment.height = clamp_size(height);
            }
            Ok(())
        }
        Action::UpdateSegment { id, patch } => {
            if let Some(segment) = state.segments.get(&id) {
                let patched = segment.patched(&patch)?;
                state.segments.insert(id, patched);
            }
            Ok(())
        }
        Action::ReorderSegments { segment_order } => reorder_segments(state, segment_order),

        Action::AddSticker { sticker } => add_sticker(state, sticker),
        Action::RemoveSticker { id } => {
            remove_sticker(state, &id);
            Ok(())
        }
        Action::UpdateSticker { id, patch } => {
            if let Some(sticker) = state.stickers.get(&id) {
                let patched = sticker.patched(&patch)?;
                require_segment(state, &patched.time_segment_id)?;
                state.stickers.insert(id, patched);
            }
            Ok(())
        }
        Action::MoveSticker {
            id,
            x,
            y,
            time_segment_id,
        } => move_stickers(
            state,
            vec![StickerMove {
                id,
                x,
                y,
                time_segment_id,
            }],
        ),
        Action::MoveStickers { moves } => move_stickers(state, moves),
        Action::ResizeSticker { id, width, height } => {
            if let Some(sticker) = state.stickers.get_mut(&id) {
                sticker.width = clamp_size(width);
                sticker.height = clamp_size(height);
            }
            Ok(())
        }
        Action::RotateSticker { id, rotation } => {
            if let Some(sticker) = state.stickers.get_mut(&id) {
                sticker.rotation = normalize_rotation(rotation);
            }
            Ok(())
        }
        Action::SetStickerZIndex { id, z_index } => {
            if let Some(sticker) = state.stickers.get_mut(&id) {
                sticker.z_index = clamp_z_index(z_index);
            }
            Ok(())
        }
        Action::BringToFront { id } => {
            restack(state, &id, Layer::Front);
            Ok(())
        }
        Action::SendToBack { id } => {
            restack(state, &id, Layer::Back);
            Ok(())
        }

        Action::SelectSticker { id } => {
            if state.stickers.contains_key(&id) {
                if state.is_multi_select_mode {
                    if !state.selected_sticker_ids.contains(&id) {
                        state.selected_sticker_ids.push(id);
                    }
                } else {
                    state.selected_sticker_ids = vec![id];
                }
            }
            Ok(())
        }
        Action::DeselectSticker { id } => {
            state.selected_sticker_ids.retain(|selected| selected != &id);
            Ok(())
        }
        Action::ClearSelection => {
            state.selected_sticker_ids.clear();
            Ok(())
        }
        Action::SelectStickers { sticker_ids } => {
            let mut seen = BTreeSet::new();
            state.selected_sticker_ids = sticker_ids
                .into_iter()
                .filter(|id| state.stickers.contains_key(id) && seen.insert(id.clone()))
                .collect();
            Ok(())
        }
        Action::SetMultiSelectMode { enabled } => {
            set_multi_select(state, enabled);
            Ok(())
        }
        Action::ToggleMultiSelect { enabled } => {
            let enabled = enabled.unwrap_or(!state.is_multi_select_mode);
            set_multi_select(state, enabled);
            Ok(())
        }
        Action::SetDragging { dragging } => {
            state.is_dragging = dragging;
            Ok(())
        }

        Action::CreateStickerGroup { group } => create_group(state, group),
        Action::DeleteStickerGroup { id } => {
            if let Some(group) = state.sticker_groups.remove(&id) {
                for member in &group.sticker_ids {
                    if let Some(sticker) = state.stickers.get_mut(member) {
                        sticker.group_id = None;
                    }
                }
            }
            Ok(())
        }
        Action::AddToGroup {
            group_id,
            sticker_id,
        } => {
            if state.sticker_groups.contains_key(&group_id)
                && state.stickers.contains_key(&sticker_id)
            {
                join_group(state, &group_id, &sticker_id);
            }
            Ok(())
        }
        Action::RemoveFromGroup {
            group_id,
            sticker_id,
        } => {
            if let Some(group) = state.sticker_groups.get_mut(&group_id) {
                group.sticker_ids.retain(|member| member != &sticker_id);
            }
            if let Some(sticker) = state.stickers.get_mut(&sticker_id) {
                if sticker.group_id.as_ref() == Some(&group_id) {
                    sticker.group_id = None;
                }
            }
            Ok(())
        }

        Action::AddTemplate { template } => {
            state.templates.insert(template.name.clone(), template);
            Ok(())
        }
        Action::RemoveTemplate { name } => {
            state.templates.remove(&name);
            Ok(())
        }

        Action::LoadState { state: loaded } => {
            loaded.validate()?;
            *state = *loaded;
            Ok(())
        }
    }
}

// =============================================================================
// Segments
// =============================================================================

fn add_segment(state: &mut MoodboardState, segment: TimeSegment) -> Result<()> {
    if state.segments.contains_key(&segment.id) {
        return Err(StateError::DuplicateId {
            kind: EntityKind::Segment,
            id: segment.id.to_string(),
        }
        .into());
    }
    let segment = segment.normalized()?;
    state.segment_order.push(segment.id.clone());
    state.segments.insert(segment.id.clone(), segment);
    Ok(())
}

fn remove_segment(state: &mut MoodboardState, id: &SegmentId) {
    if state.segments.remove(id).is_none() {
        return;
    }
    state.segment_order.retain(|ordered| ordered != id);

    for segment in state.segments.values_mut() {
        if segment.parent_id.as_ref() == Some(id) {
            segment.parent_id = None;
        }
        segment.children_ids.retain(|child| child != id);
    }

    let orphaned: Vec<StickerId> = state
        .stickers
        .values()
        .filter(|sticker| &sticker.time_segment_id == id)
        .map(|sticker| sticker.id.clone())
        .collect();
    for sticker in &orphaned {
        remove_sticker(state, sticker);
    }
}

fn reorder_segments(state: &mut MoodboardState, segment_order: Vec<SegmentId>) -> Result<()> {
    let proposed: BTreeSet<&SegmentId> = segment_order.iter().collect();
    let is_permutation = proposed.len() == segment_order.len()
        && proposed.len() == state.segments.len()
        && proposed.iter().all(|id| state.segments.contains_key(*id));
    if !is_permutation {
        return Err(StateError::Inconsistent(
            "segment order must list every segment exactly once".to_string(),
        )
        .into());
    }
    state.segment_order = segment_order;
    Ok(())
}

fn require_segment(state: &MoodboardState, id: &SegmentId) -> Result<()> {
    if state.segments.contains_key(id) {
        Ok(())
    } else {
        Err(StateError::UnknownSegment(id.to_string()).into())
    }
}

// =============================================================================
// Stickers
// =============================================================================

fn add_sticker(state: &mut MoodboardState, mut draft: StickerDraft) -> Result<()> {
    if state.stickers.contains_key(&draft.id) {
        return Err(StateError::DuplicateId {
            kind: EntityKind::Sticker,
            id: draft.id.to_string(),
        }
        .into());
    }
    require_segment(state, &draft.time_segment_id)?;

    let template = draft
        .template
        .as_ref()
        .and_then(|name| state.templates.get(name))
        .cloned();
    if let Some(template) = &template {
        if draft.width <= 0.0 {
            draft.width = template.width.unwrap_or_default();
        }
        if draft.height <= 0.0 {
            draft.height = template.height.unwrap_or_default();
        }
        if draft.style.is_none() {
            draft.style.clone_from(&template.style);
        }
    }

    let group_id = draft.group_id.take();
    let mut sticker = draft.into_sticker()?;
    if let (Some(template), StickerKind::Custom { data, .. }) = (&template, &mut sticker.kind) {
        for (key, value) in &template.data {
            data.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }

    let id = sticker.id.clone();
    state.stickers.insert(id.clone(), sticker);
    if let Some(group_id) = group_id.filter(|group| state.sticker_groups.contains_key(group)) {
        join_group(state, &group_id, &id);
    }
    Ok(())
}

fn remove_sticker(state: &mut MoodboardState, id: &StickerId) {
    if state.stickers.remove(id).is_none() {
        return;
    }
    for group in state.sticker_groups.values_mut() {
        group.sticker_ids.retain(|member| member != id);
    }
    state.selected_sticker_ids.retain(|selected| selected != id);
}

fn move_stickers(state: &mut MoodboardState, moves: Vec<StickerMove>) -> Result<()> {
    for movement in &moves {
        if state.stickers.contains_key(&movement.id) {
            require_segment(state, &movement.time_segment_id)?;
        }
    }
    for movement in moves {
        if let Some(sticker) = state.stickers.get_mut(&movement.id) {
            sticker.x = clamp_position(movement.x);
            sticker.y = clamp_position(movement.y);
            sticker.time_segment_id = movement.time_segment_id;
        }
    }
    Ok(())
}

enum Layer {
    Front,
    Back,
}

/// Moves a sticker above or below every other sticker of its segment.
fn restack(state: &mut MoodboardState, id: &StickerId, layer: Layer) {
    let Some((segment, current)) = state
        .stickers
        .get(id)
        .map(|s| (s.time_segment_id.clone(), s.z_index))
    else {
        return;
    };
    let siblings = state
        .stickers
        .values()
        .filter(|other| other.time_segment_id == segment && &other.id != id)
        .map(|other| other.z_index);
    let z_index = match layer {
        Layer::Front => siblings.max().map_or(current, |top| top.saturating_add(1)),
        Layer::Back => siblings.min().map_or(current, |bottom| bottom.saturating_sub(1)),
    };
    if let Some(sticker) = state.stickers.get_mut(id) {
        sticker.z_index = clamp_z_index(z_index);
    }
}

// =============================================================================
// Selection
// =============================================================================

fn set_multi_select(state: &mut MoodboardState, enabled: bool) {
    if !enabled {
        state.selected_sticker_ids.clear();
    }
    state.is_multi_select_mode = enabled;
}

// =============================================================================
// Groups
// =============================================================================

fn create_group(state: &mut MoodboardState, group: StickerGroup) -> Result<()> {
    if state.sticker_groups.contains_key(&group.id) {
        return Err(StateError::DuplicateId {
            kind: EntityKind::Group,
            id: group.id.to_string(),
        }
        .into());
    }
    let members = group.sticker_ids.clone();
    let group_id = group.id.clone();
    state.sticker_groups.insert(
        group_id.clone(),
        StickerGroup {
            sticker_ids: Vec::new(),
            ..group
        },
    );
    for member in members {
        if state.stickers.contains_key(&member) {
            join_group(state, &group_id, &member);
        } else {
            tracing::debug!(group = %group_id, sticker = %member, "skipping unknown group member");
        }
    }
    Ok(())
}

/// Links a sticker to a group on both sides, leaving any previous group.
fn join_group(state: &mut MoodboardState, group_id: &GroupId, sticker_id: &StickerId) {
    let Some(sticker) = state.stickers.get_mut(sticker_id) else {
        return;
    };
    if let Some(previous) = sticker.group_id.replace(group_id.clone()) {
        if &previous != group_id {
            if let Some(group) = state.sticker_groups.get_mut(&previous) {
                group.sticker_ids.retain(|member| member != sticker_id);
            }
        }
    }
    if let Some(group) = state.sticker_groups.get_mut(group_id) {
        if !group.contains(sticker_id) {
            group.sticker_ids.push(sticker_id.clone());
        }
    }
}
