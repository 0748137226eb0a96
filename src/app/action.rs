// SPDX-License-Identifier: MPL-2.0
//! Board actions: the only way to describe a state change.
//!
//! Actions are serialized as `{"type": "ADD_STICKER", "payload": {...}}` so
//! that recorded sessions and presentation-layer payloads share one format.

use super::state::MoodboardState;
use crate::domain::board::{
    GroupId, SegmentId, SegmentPatch, StickerDraft, StickerGroup, StickerId, StickerPatch,
    StickerTemplate, TimeSegment,
};
use serde::{Deserialize, Serialize};

/// One sticker's destination in a group drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMove {
    pub id: StickerId,
    pub x: f64,
    pub y: f64,
    pub time_segment_id: SegmentId,
}

/// A requested state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    // Segments
    AddSegment {
        segment: TimeSegment,
    },
    /// Cascades to the segment's stickers and their group memberships.
    RemoveSegment {
        id: SegmentId,
    },
    RenameSegment {
        id: SegmentId,
        title: String,
    },
    ResizeSegment {
        id: SegmentId,
        width: f64,
        height: f64,
    },
    UpdateSegment {
        id: SegmentId,
        patch: SegmentPatch,
    },
    /// Replaces the display order wholesale.
    ReorderSegments {
        segment_order: Vec<SegmentId>,
    },

    // Stickers
    AddSticker {
        sticker: StickerDraft,
    },
    RemoveSticker {
        id: StickerId,
    },
    UpdateSticker {
        id: StickerId,
        patch: StickerPatch,
    },
    /// Position and ownership change together.
    MoveSticker {
        id: StickerId,
        x: f64,
        y: f64,
        time_segment_id: SegmentId,
    },
    /// Commit of a multi-sticker drag; all moves apply or none do.
    MoveStickers {
        moves: Vec<StickerMove>,
    },
    ResizeSticker {
        id: StickerId,
        width: f64,
        height: f64,
    },
    RotateSticker {
        id: StickerId,
        rotation: f64,
    },
    #[serde(rename = "SET_STICKER_ZINDEX")]
    SetStickerZIndex {
        id: StickerId,
        z_index: i32,
    },
    BringToFront {
        id: StickerId,
    },
    SendToBack {
        id: StickerId,
    },

    // Selection
    SelectSticker {
        id: StickerId,
    },
    DeselectSticker {
        id: StickerId,
    },
    ClearSelection,
    SelectStickers {
        sticker_ids: Vec<StickerId>,
    },
    SetMultiSelectMode {
        enabled: bool,
    },
    /// Flips multi-select mode, or forces it when `enabled` is given.
    ToggleMultiSelect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    SetDragging {
        dragging: bool,
    },

    // Groups
    CreateStickerGroup {
        group: StickerGroup,
    },
    DeleteStickerGroup {
        id: GroupId,
    },
    AddToGroup {
        group_id: GroupId,
        sticker_id: StickerId,
    },
    RemoveFromGroup {
        group_id: GroupId,
        sticker_id: StickerId,
    },

    // Templates
    AddTemplate {
        template: StickerTemplate,
    },
    RemoveTemplate {
        name: String,
    },

    /// Wholesale replacement, used by undo/redo and restore.
    LoadState {
        state: Box<MoodboardState>,
    },
}

impl Action {
    /// Wire name of the action, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddSegment { .. } => "ADD_SEGMENT",
            Action::RemoveSegment { .. } => "REMOVE_SEGMENT",
            Action::RenameSegment { .. } => "RENAME_SEGMENT",
            Action::ResizeSegment { .. } => "RESIZE_SEGMENT",
            Action::UpdateSegment { .. } => "UPDATE_SEGMENT",
            Action::ReorderSegments { .. } => "REORDER_SEGMENTS",
            Action::AddSticker { .. } => "ADD_STICKER",
            Action::RemoveSticker { .. } => "REMOVE_STICKER",
            Action::UpdateSticker { .. } => "UPDATE_STICKER",
            Action::MoveSticker { .. } => "MOVE_STICKER",
            Action::MoveStickers { .. } => "MOVE_STICKERS",
            Action::ResizeSticker { .. } => "RESIZE_STICKER",
            Action::RotateSticker { .. } => "ROTATE_STICKER",
            Action::SetStickerZIndex { .. } => "SET_STICKER_ZINDEX",
            Action::BringToFront { .. } => "BRING_TO_FRONT",
            Action::SendToBack { .. } => "SEND_TO_BACK",
            Action::SelectSticker { .. } => "SELECT_STICKER",
            Action::DeselectSticker { .. } => "DESELECT_STICKER",
            Action::ClearSelection => "CLEAR_SELECTION",
            Action::SelectStickers { .. } => "SELECT_STICKERS",
            Action::SetMultiSelectMode { .. } => "SET_MULTI_SELECT_MODE",
            Action::ToggleMultiSelect { .. } => "TOGGLE_MULTI_SELECT",
            Action::SetDragging { .. } => "SET_DRAGGING",
            Action::CreateStickerGroup { .. } => "CREATE_STICKER_GROUP",
            Action::DeleteStickerGroup { .. } => "DELETE_STICKER_GROUP",
            Action::AddToGroup { .. } => "ADD_TO_GROUP",
            Action::RemoveFromGroup { .. } => "REMOVE_FROM_GROUP",
            Action::AddTemplate { .. } => "ADD_TEMPLATE",
            Action::RemoveTemplate { .. } => "REMOVE_TEMPLATE",
            Action::LoadState { .. } => "LOAD_STATE",
        }
    }

    /// Whether the resulting state should stay out of the undo history.
    ///
    /// The drag flag only tracks an interaction in flight.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Action::SetDragging { .. })
    }

    /// Whether the action only touches the selection.
    #[must_use]
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Action::SelectSticker { .. }
                | Action::DeselectSticker { .. }
                | Action::ClearSelection
                | Action::SelectStickers { .. }
        )
    }
}
