// SPDX-License-Identifier: MPL-2.0
//! Query services (CQRS read-side).
//!
//! These functions read a [`MoodboardState`](crate::app::state::MoodboardState)
//! and never modify it. Views, the exporter and the CLI use them instead of
//! walking the state maps themselves.
//!
//! # Available Services
//!
//! - [`board`]: Ordered segments, per-segment stickers, groups, selection and
//!   a summary snapshot ([`BoardSummary`])

pub mod board;

pub use board::{
    board_summary, group_members, segments_in_order, selected_stickers, stickers_in_segment,
    BoardSummary, SegmentSummary,
};
