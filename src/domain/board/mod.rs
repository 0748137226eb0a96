// SPDX-License-Identifier: MPL-2.0
//! Board entity model.
//!
//! This module provides the typed entities placed on a board:
//! - [`Sticker`] and its variants ([`StickerKind`]), plus the loosely-typed
//!   [`StickerDraft`]/[`StickerPatch`] payloads that normalize into it
//! - [`TimeSegment`] and [`TimeRange`]
//! - [`StickerGroup`] and [`StickerTemplate`]
//! - Identifier newtypes and [`HistoryCapacity`]

pub mod group;
pub mod ids;
pub mod newtypes;
pub mod segment;
pub mod sticker;

pub use group::{StickerGroup, StickerTemplate};
pub use ids::{fresh_id, GroupId, SegmentId, StickerId};
pub use newtypes::{history_capacity_bounds, HistoryCapacity};
pub use segment::{SegmentPatch, TimeRange, TimeSegment};
pub use sticker::{
    clamp_position, clamp_size, clamp_z_index, normalize_rotation, CustomData, GeoLocation, Size,
    Sticker, StickerDraft, StickerKind, StickerPatch, StickerStyle, StickerType,
};
