// SPDX-License-Identifier: MPL-2.0
//! Board newtypes.
//!
//! This module provides type-safe wrappers for board values,
//! ensuring they are always within valid ranges.

// =============================================================================
// History Capacity Bounds
// =============================================================================

/// Undo stack capacity bounds (10 to 1000 snapshots).
pub mod history_capacity_bounds {
    use crate::config::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY, MIN_HISTORY_CAPACITY};

    /// Minimum capacity.
    pub const MIN: usize = MIN_HISTORY_CAPACITY;
    /// Maximum capacity.
    pub const MAX: usize = MAX_HISTORY_CAPACITY;
    /// Default capacity.
    pub const DEFAULT: usize = DEFAULT_HISTORY_CAPACITY;
}

// =============================================================================
// HistoryCapacity
// =============================================================================

/// Number of snapshots the undo stack retains.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (10–1000 snapshots). Once the stack is
/// full, recording a new snapshot evicts the oldest one.
///
/// # Example
///
/// ```
/// use moodboard::domain::board::HistoryCapacity;
///
/// let capacity = HistoryCapacity::new(50);
/// assert_eq!(capacity.value(), 50);
///
/// // Values outside range are clamped
/// assert_eq!(HistoryCapacity::new(1).value(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(history_capacity_bounds::MIN, history_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= history_capacity_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= history_capacity_bounds::MAX
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_capacity_bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_bounds() {
        assert_eq!(HistoryCapacity::new(0).value(), history_capacity_bounds::MIN);
        assert_eq!(
            HistoryCapacity::new(usize::MAX).value(),
            history_capacity_bounds::MAX
        );
        assert_eq!(HistoryCapacity::new(250).value(), 250);
    }

    #[test]
    fn default_is_within_bounds() {
        let capacity = HistoryCapacity::default();
        assert_eq!(capacity.value(), history_capacity_bounds::DEFAULT);
        assert!(!capacity.is_min());
        assert!(!capacity.is_max());
    }

    #[test]
    fn extremes_are_reported() {
        assert!(HistoryCapacity::new(0).is_min());
        assert!(HistoryCapacity::new(5000).is_max());
    }
}
