// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the board core. Constants are organized by category.
//!
//! # Categories
//!
//! - **Stickers**: Minimum edge length and z-index bounds
//! - **Segments**: Seeded segment and default segment dimensions
//! - **History**: Undo stack capacity
//! - **Autosave**: Debounce window for persistence writes
//! - **Canvas**: Default layout spacing and zoom bounds

// ==========================================================================
// Sticker Defaults
// ==========================================================================

/// Minimum sticker width/height in canvas units (touch-target size).
pub const MIN_STICKER_SIZE: f64 = 44.0;

/// Lowest allowed sticker z-index.
pub const MIN_Z_INDEX: i32 = 0;

/// Highest allowed sticker z-index.
pub const MAX_Z_INDEX: i32 = 10_000;

/// Glyph used for icon stickers created without one.
pub const DEFAULT_ICON_GLYPH: &str = "\u{2B50}";

/// Template name used for custom stickers created without one.
pub const DEFAULT_CUSTOM_TEMPLATE: &str = "blank";

/// Map zoom used for map stickers created without a location.
pub const DEFAULT_MAP_ZOOM: f64 = 1.0;

// ==========================================================================
// Segment Defaults
// ==========================================================================

/// Identifier of the segment seeded into a fresh board.
pub const SEEDED_SEGMENT_ID: &str = "day-1";

/// Title of the segment seeded into a fresh board.
pub const SEEDED_SEGMENT_TITLE: &str = "Day 1";

/// Default segment width in canvas units.
pub const DEFAULT_SEGMENT_WIDTH: f64 = 800.0;

/// Default segment height in canvas units.
pub const DEFAULT_SEGMENT_HEIGHT: f64 = 600.0;

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of snapshots kept in the undo stack.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Minimum undo stack capacity.
pub const MIN_HISTORY_CAPACITY: usize = 10;

/// Maximum undo stack capacity.
pub const MAX_HISTORY_CAPACITY: usize = 1000;

// ==========================================================================
// Autosave Defaults
// ==========================================================================

/// Default quiet period before an autosave write (milliseconds).
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 500;

/// Minimum autosave debounce (milliseconds).
pub const MIN_AUTOSAVE_DEBOUNCE_MS: u64 = 50;

/// Maximum autosave debounce (milliseconds).
pub const MAX_AUTOSAVE_DEBOUNCE_MS: u64 = 10_000;

// ==========================================================================
// Canvas Defaults
// ==========================================================================

/// Horizontal gap between segments in the stacked canvas layout.
pub const DEFAULT_SEGMENT_GAP: f64 = 48.0;

/// Default canvas zoom factor (1.0 = 100%).
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Minimum canvas zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum canvas zoom factor.
pub const MAX_ZOOM: f64 = 4.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_STICKER_SIZE > 0.0);
    assert!(MIN_Z_INDEX < MAX_Z_INDEX);

    assert!(DEFAULT_SEGMENT_WIDTH >= MIN_STICKER_SIZE);
    assert!(DEFAULT_SEGMENT_HEIGHT >= MIN_STICKER_SIZE);

    assert!(MIN_HISTORY_CAPACITY > 1);
    assert!(MAX_HISTORY_CAPACITY >= MIN_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_CAPACITY >= MIN_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_CAPACITY <= MAX_HISTORY_CAPACITY);

    assert!(MIN_AUTOSAVE_DEBOUNCE_MS > 0);
    assert!(MAX_AUTOSAVE_DEBOUNCE_MS >= MIN_AUTOSAVE_DEBOUNCE_MS);
    assert!(DEFAULT_AUTOSAVE_DEBOUNCE_MS >= MIN_AUTOSAVE_DEBOUNCE_MS);
    assert!(DEFAULT_AUTOSAVE_DEBOUNCE_MS <= MAX_AUTOSAVE_DEBOUNCE_MS);

    assert!(MIN_ZOOM > 0.0);
    assert!(MIN_ZOOM < DEFAULT_ZOOM);
    assert!(MAX_ZOOM > DEFAULT_ZOOM);
};
