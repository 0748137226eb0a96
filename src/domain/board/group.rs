// SPDX-License-Identifier: MPL-2.0
//! Sticker groups and reusable custom-sticker templates.

use super::ids::{GroupId, StickerId};
use super::sticker::{CustomData, StickerStyle};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of stickers.
///
/// The group's `sticker_ids` list is authoritative; each member's
/// `group_id` is a back-reference kept in sync by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub sticker_ids: Vec<StickerId>,
}

impl StickerGroup {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sticker_ids: Vec::new(),
        }
    }

    /// Sets the initial members.
    #[must_use]
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StickerId>,
    {
        self.sticker_ids = members.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn contains(&self, sticker: &StickerId) -> bool {
        self.sticker_ids.contains(sticker)
    }
}

/// Reusable defaults for custom stickers, keyed by name on the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Keys missing from a new custom sticker's data are filled from here.
    #[serde(default)]
    pub data: CustomData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StickerStyle>,
}

impl StickerTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
