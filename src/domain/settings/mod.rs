// SPDX-License-Identifier: MPL-2.0
//! Board presentation settings persisted next to the board.
//!
//! These values are opaque to the state core: they are stored, validated on
//! load and handed back to whichever view renders the board.

mod newtypes;

pub use newtypes::{AutosaveDelay, ZoomLevel};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Alternate renderings of the same board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Canvas,
    Timeline,
    List,
    Grid,
    Map,
}

/// Per-board view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan_x: f64,
    #[serde(default)]
    pub pan_y: f64,
    #[serde(default)]
    pub snap_to_grid: bool,
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            zoom: default_zoom(),
            pan_x: 0.0,
            pan_y: 0.0,
            snap_to_grid: false,
            grid_size: default_grid_size(),
        }
    }
}

fn default_zoom() -> f64 {
    ZoomLevel::default().value()
}

fn default_grid_size() -> f64 {
    16.0
}

impl BoardSettings {
    /// Rejects values no view could render.
    pub fn validate(&self) -> Result<()> {
        if !ZoomLevel::is_valid(self.zoom) {
            return Err(Error::Validation(format!("zoom {} out of range", self.zoom)));
        }
        if !self.pan_x.is_finite() || !self.pan_y.is_finite() {
            return Err(Error::Validation("pan offset is not finite".into()));
        }
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(Error::Validation(format!(
                "grid size {} must be positive",
                self.grid_size
            )));
        }
        Ok(())
    }

    /// Returns the zoom as a clamped value object.
    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        ZoomLevel::new(self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BoardSettings::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_zoom_is_a_validation_error() {
        let settings = BoardSettings {
            zoom: 40.0,
            ..BoardSettings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn non_positive_grid_is_rejected() {
        let settings = BoardSettings {
            grid_size: 0.0,
            ..BoardSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: BoardSettings = serde_json::from_str(r#"{"viewMode":"timeline"}"#).unwrap();
        assert_eq!(settings.view_mode, ViewMode::Timeline);
        assert_eq!(settings.zoom, 1.0);
    }
}
