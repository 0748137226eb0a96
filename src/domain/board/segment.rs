// SPDX-License-Identifier: MPL-2.0
//! Time segment entity: one day or period of the plan.

use super::ids::SegmentId;
use super::sticker::clamp_size;
use crate::config::{DEFAULT_SEGMENT_HEIGHT, DEFAULT_SEGMENT_WIDTH};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Calendar span of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a range, rejecting an end before the start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Returns an error when `end` precedes `start`.
    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(Error::Validation(format!(
                "time range ends ({}) before it starts ({})",
                self.end.to_rfc3339(),
                self.start.to_rfc3339()
            )));
        }
        Ok(())
    }

    /// Length of the range.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A titled container of stickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSegment {
    pub id: SegmentId,
    pub title: String,
    /// Display sequence hint. `segmentOrder` on the board is authoritative.
    pub order: i32,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<SegmentId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_ids: Vec<SegmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TimeSegment {
    /// Creates a segment with the default canvas size.
    pub fn new(id: impl Into<SegmentId>, title: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
            width: DEFAULT_SEGMENT_WIDTH,
            height: DEFAULT_SEGMENT_HEIGHT,
            parent_id: None,
            children_ids: Vec::new(),
            time_range: None,
            color: None,
            collapsed: false,
            description: None,
        }
    }

    /// Sets the size.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Checks field-level constraints and clamps the size.
    pub fn normalized(mut self) -> Result<Self> {
        if let Some(range) = &self.time_range {
            range.validate()?;
        }
        self.width = clamp_size(self.width);
        self.height = clamp_size(self.height);
        Ok(self)
    }

    /// Merges a partial update into a copy of this segment.
    pub fn patched(&self, patch: &SegmentPatch) -> Result<Self> {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title.clone_from(title);
        }
        if let Some(order) = patch.order {
            next.order = order;
        }
        if let Some(width) = patch.width {
            next.width = width;
        }
        if let Some(height) = patch.height {
            next.height = height;
        }
        if let Some(parent_id) = &patch.parent_id {
            next.parent_id = Some(parent_id.clone());
        }
        if let Some(children_ids) = &patch.children_ids {
            next.children_ids.clone_from(children_ids);
        }
        if let Some(range) = patch.time_range {
            next.time_range = Some(range);
        }
        if let Some(color) = &patch.color {
            next.color = Some(color.clone());
        }
        if let Some(collapsed) = patch.collapsed {
            next.collapsed = collapsed;
        }
        if let Some(description) = &patch.description {
            next.description = Some(description.clone());
        }
        next.normalized()
    }
}

/// Partial update payload for `UpdateSegment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<SegmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<SegmentId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
