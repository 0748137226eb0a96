// SPDX-License-Identifier: MPL-2.0
//! Sticker entity and its typed variants.
//!
//! A sticker is a positioned, resizable, rotatable content item owned by
//! exactly one time segment. The variant payload lives in [`StickerKind`];
//! loosely-typed payloads coming from the presentation layer arrive as a
//! [`StickerDraft`] (for creation) or a [`StickerPatch`] (for updates) and are
//! normalized into a [`Sticker`] by a single exhaustive match per operation.

use super::ids::{GroupId, SegmentId, StickerId};
use crate::config::{
    DEFAULT_CUSTOM_TEMPLATE, DEFAULT_ICON_GLYPH, DEFAULT_MAP_ZOOM, MAX_Z_INDEX, MIN_STICKER_SIZE,
    MIN_Z_INDEX,
};
use crate::error::{Error, Result};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque visual style attributes. Never inspected by the core.
pub type StickerStyle = serde_json::Map<String, Value>;

/// Free-form payload of a custom sticker.
pub type CustomData = BTreeMap<String, Value>;

// =============================================================================
// Payload value types
// =============================================================================

/// Pixel dimensions of an image sticker's source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Geographic position shown by a map sticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

// =============================================================================
// StickerType
// =============================================================================

/// Discriminant of a sticker variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickerType {
    Text,
    Image,
    Icon,
    Link,
    Map,
    Custom,
}

impl StickerType {
    /// All sticker types, in palette order.
    pub const ALL: [StickerType; 6] = [
        StickerType::Text,
        StickerType::Image,
        StickerType::Icon,
        StickerType::Link,
        StickerType::Map,
        StickerType::Custom,
    ];

    /// Returns the wire name of this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StickerType::Text => "text",
            StickerType::Image => "image",
            StickerType::Icon => "icon",
            StickerType::Link => "link",
            StickerType::Map => "map",
            StickerType::Custom => "custom",
        }
    }
}

impl fmt::Display for StickerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StickerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StickerType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidStickerType(s.to_string()))
    }
}

// =============================================================================
// StickerKind
// =============================================================================

/// Variant-specific sticker payload, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum StickerKind {
    Text {
        content: String,
    },
    Image {
        content: String,
        original_size: Size,
    },
    Icon {
        icon: String,
    },
    Link {
        content: String,
        title: String,
    },
    Map {
        location: GeoLocation,
    },
    Custom {
        template: String,
        #[serde(default)]
        data: CustomData,
    },
}

impl StickerKind {
    /// Returns the discriminant of this payload.
    #[must_use]
    pub fn sticker_type(&self) -> StickerType {
        match self {
            StickerKind::Text { .. } => StickerType::Text,
            StickerKind::Image { .. } => StickerType::Image,
            StickerKind::Icon { .. } => StickerType::Icon,
            StickerKind::Link { .. } => StickerType::Link,
            StickerKind::Map { .. } => StickerType::Map,
            StickerKind::Custom { .. } => StickerType::Custom,
        }
    }

    /// Returns the `content` string for variants that carry one.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            StickerKind::Text { content }
            | StickerKind::Image { content, .. }
            | StickerKind::Link { content, .. } => Some(content),
            StickerKind::Icon { .. } | StickerKind::Map { .. } | StickerKind::Custom { .. } => {
                None
            }
        }
    }
}

// =============================================================================
// Sticker
// =============================================================================

/// A positioned content item on a time segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: StickerId,
    /// Owning segment. Must reference an existing segment.
    pub time_segment_id: SegmentId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, normalized to `[0, 360)`.
    pub rotation: f64,
    /// Relative layering within the owning segment.
    pub z_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Mirrors membership in the board's selection.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StickerStyle>,
    #[serde(flatten)]
    pub kind: StickerKind,
}

impl Sticker {
    /// Returns the discriminant of this sticker's payload.
    #[must_use]
    pub fn sticker_type(&self) -> StickerType {
        self.kind.sticker_type()
    }

    /// Unrotated bounds in the owning segment's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Axis-aligned bounding box of the rotated sticker, in segment space.
    #[must_use]
    pub fn rotated_bounds(&self) -> Rect {
        let rect = self.bounds();
        if self.rotation == 0.0 {
            return rect;
        }
        Affine::rotate_about(self.rotation.to_radians(), rect.center()).transform_rect_bbox(rect)
    }

    /// Center point in segment space.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Clamps position, size, rotation and layering into their valid ranges.
    pub fn normalize_geometry(&mut self) {
        self.x = clamp_position(self.x);
        self.y = clamp_position(self.y);
        self.width = clamp_size(self.width);
        self.height = clamp_size(self.height);
        self.rotation = normalize_rotation(self.rotation);
        self.z_index = clamp_z_index(self.z_index);
    }

    /// Merges a partial update into a copy of this sticker.
    ///
    /// Variant fields are normalized the same way as on creation, but only
    /// the fields present in `patch` are taken from it; everything else is
    /// carried over. Changing `type` keeps compatible payload (`content`)
    /// and fills the rest with defaults.
    pub fn patched(&self, patch: &StickerPatch) -> Result<Sticker> {
        let target = match &patch.sticker_type {
            Some(raw) => raw.parse::<StickerType>()?,
            None => self.sticker_type(),
        };

        let current = &self.kind;
        let content = || {
            patch
                .content
                .clone()
                .or_else(|| current.content().map(str::to_string))
                .unwrap_or_default()
        };

        let kind = match target {
            StickerType::Text => StickerKind::Text { content: content() },
            StickerType::Image => StickerKind::Image {
                content: content(),
                original_size: patch.original_size.unwrap_or(match current {
                    StickerKind::Image { original_size, .. } => *original_size,
                    _ => Size::default(),
                }),
            },
            StickerType::Icon => StickerKind::Icon {
                icon: normalize_glyph(patch.icon.clone().or_else(|| match current {
                    StickerKind::Icon { icon } => Some(icon.clone()),
                    _ => None,
                })),
            },
            StickerType::Link => {
                let url = content();
                let title = patch
                    .title
                    .clone()
                    .or_else(|| match current {
                        StickerKind::Link { title, .. } => Some(title.clone()),
                        _ => None,
                    })
                    .unwrap_or_else(|| url.clone());
                StickerKind::Link {
                    content: url,
                    title,
                }
            }
            StickerType::Map => StickerKind::Map {
                location: patch.location.unwrap_or(match current {
                    StickerKind::Map { location } => *location,
                    _ => GeoLocation::default(),
                }),
            },
            StickerType::Custom => {
                let (template, data) = match current {
                    StickerKind::Custom { template, data } => (Some(template.clone()), data.clone()),
                    _ => (None, CustomData::new()),
                };
                StickerKind::Custom {
                    template: patch
                        .template
                        .clone()
                        .or(template)
                        .unwrap_or_else(|| DEFAULT_CUSTOM_TEMPLATE.to_string()),
                    data: patch.data.clone().unwrap_or(data),
                }
            }
        };

        let mut next = Sticker {
            id: self.id.clone(),
            time_segment_id: patch
                .time_segment_id
                .clone()
                .unwrap_or_else(|| self.time_segment_id.clone()),
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
            rotation: patch.rotation.unwrap_or(self.rotation),
            z_index: patch.z_index.unwrap_or(self.z_index),
            group_id: self.group_id.clone(),
            is_selected: self.is_selected,
            style: patch.style.clone().or_else(|| self.style.clone()),
            kind,
        };
        next.normalize_geometry();
        Ok(next)
    }
}

// =============================================================================
// StickerDraft
// =============================================================================

/// Creation payload for `AddSticker`.
///
/// The `type` discriminant is kept as a string so that unknown types coming
/// from the presentation layer or from imported data surface as
/// [`Error::InvalidStickerType`] instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerDraft {
    pub id: StickerId,
    #[serde(rename = "type")]
    pub sticker_type: String,
    pub time_segment_id: SegmentId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StickerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CustomData>,
}

impl StickerDraft {
    /// Starts a draft of the given type on a segment.
    pub fn new(
        id: impl Into<StickerId>,
        sticker_type: StickerType,
        segment: impl Into<SegmentId>,
    ) -> Self {
        Self {
            id: id.into(),
            sticker_type: sticker_type.as_str().to_string(),
            time_segment_id: segment.into(),
            ..Self::default()
        }
    }

    /// Text sticker draft.
    pub fn text(
        id: impl Into<StickerId>,
        segment: impl Into<SegmentId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new(id, StickerType::Text, segment)
        }
    }

    /// Sets the position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the size.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the z-index.
    #[must_use]
    pub fn layered(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Normalizes the draft into a sticker, filling documented defaults for
    /// any missing variant field.
    pub fn into_sticker(self) -> Result<Sticker> {
        let sticker_type: StickerType = self.sticker_type.parse()?;

        let kind = match sticker_type {
            StickerType::Text => StickerKind::Text {
                content: self.content.unwrap_or_default(),
            },
            StickerType::Image => StickerKind::Image {
                content: self.content.unwrap_or_default(),
                original_size: self.original_size.unwrap_or_default(),
            },
            StickerType::Icon => StickerKind::Icon {
                icon: normalize_glyph(self.icon),
            },
            StickerType::Link => {
                let url = self.content.unwrap_or_default();
                let title = self.title.unwrap_or_else(|| url.clone());
                StickerKind::Link {
                    content: url,
                    title,
                }
            }
            StickerType::Map => StickerKind::Map {
                location: self.location.unwrap_or_default(),
            },
            StickerType::Custom => StickerKind::Custom {
                template: self
                    .template
                    .unwrap_or_else(|| DEFAULT_CUSTOM_TEMPLATE.to_string()),
                data: self.data.unwrap_or_default(),
            },
        };

        let mut sticker = Sticker {
            id: self.id,
            time_segment_id: self.time_segment_id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            z_index: self.z_index,
            group_id: self.group_id,
            is_selected: false,
            style: self.style,
            kind,
        };
        sticker.normalize_geometry();
        Ok(sticker)
    }
}

// =============================================================================
// StickerPatch
// =============================================================================

/// Partial update payload for `UpdateSticker`.
///
/// Group membership is deliberately absent: it only changes through the
/// group actions, which keep both sides of the link in sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sticker_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_segment_id: Option<SegmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StickerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CustomData>,
}

// =============================================================================
// Normalization helpers
// =============================================================================

fn normalize_glyph(icon: Option<String>) -> String {
    icon.filter(|glyph| !glyph.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ICON_GLYPH.to_string())
}

/// Clamps a coordinate to a finite, non-negative value.
#[must_use]
pub fn clamp_position(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Clamps an edge length to at least [`MIN_STICKER_SIZE`].
#[must_use]
pub fn clamp_size(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_STICKER_SIZE)
    } else {
        MIN_STICKER_SIZE
    }
}

/// Normalizes an angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Clamps a z-index into the layering bounds.
#[must_use]
pub fn clamp_z_index(z_index: i32) -> i32 {
    z_index.clamp(MIN_Z_INDEX, MAX_Z_INDEX)
}
