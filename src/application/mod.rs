// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Query services (CQRS read-side)
//!
//! # Dependency Rule
//!
//! - The application layer reads board state and domain types
//! - Infrastructure implements application layer ports
//! - The binary and any embedding UI use application layer services
//!
//! # Example
//!
//! ```
//! use moodboard::app::state::MoodboardState;
//! use moodboard::application::query::board_summary;
//!
//! let summary = board_summary(&MoodboardState::default());
//! assert_eq!(summary.segments.len(), 1);
//! assert_eq!(summary.sticker_count, 0);
//! ```

pub mod port;
pub mod query;
