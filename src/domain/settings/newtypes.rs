// SPDX-License-Identifier: MPL-2.0
//! Settings newtypes.
//!
//! This module provides type-safe wrappers for settings values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_AUTOSAVE_DEBOUNCE_MS, DEFAULT_ZOOM, MAX_AUTOSAVE_DEBOUNCE_MS, MAX_ZOOM,
    MIN_AUTOSAVE_DEBOUNCE_MS, MIN_ZOOM,
};
use std::time::Duration;

// =============================================================================
// ZoomLevel
// =============================================================================

/// Canvas zoom factor, guaranteed to be within the valid range (0.1–4.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel(f64);

impl ZoomLevel {
    /// Creates a new zoom level, clamping to the valid range.
    ///
    /// Non-finite input falls back to the default zoom.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        if factor.is_finite() {
            Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self::default()
        }
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns whether `factor` lies inside the valid range without clamping.
    #[must_use]
    pub fn is_valid(factor: f64) -> bool {
        factor.is_finite() && (MIN_ZOOM..=MAX_ZOOM).contains(&factor)
    }

    /// Multiplies the zoom by `step`, clamping the result.
    #[must_use]
    pub fn scaled(self, step: f64) -> Self {
        Self::new(self.0 * step)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

// =============================================================================
// AutosaveDelay
// =============================================================================

/// Quiet period before the autosave scheduler writes (50 ms–10 s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveDelay(u64);

impl AutosaveDelay {
    /// Creates a new delay in milliseconds, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_AUTOSAVE_DEBOUNCE_MS, MAX_AUTOSAVE_DEBOUNCE_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for AutosaveDelay {
    fn default() -> Self {
        Self(DEFAULT_AUTOSAVE_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamps_and_rejects_non_finite() {
        assert_eq!(ZoomLevel::new(10.0).value(), MAX_ZOOM);
        assert_eq!(ZoomLevel::new(0.0).value(), MIN_ZOOM);
        assert_eq!(ZoomLevel::new(f64::NAN), ZoomLevel::default());
    }

    #[test]
    fn zoom_scaling_stays_in_range() {
        let zoom = ZoomLevel::new(3.0).scaled(2.0);
        assert_eq!(zoom.value(), MAX_ZOOM);
        assert!(ZoomLevel::is_valid(1.5));
        assert!(!ZoomLevel::is_valid(-1.0));
    }

    #[test]
    fn autosave_delay_clamps() {
        assert_eq!(AutosaveDelay::new(0).as_millis(), MIN_AUTOSAVE_DEBOUNCE_MS);
        assert_eq!(
            AutosaveDelay::new(u64::MAX).as_duration(),
            Duration::from_millis(MAX_AUTOSAVE_DEBOUNCE_MS)
        );
    }
}
