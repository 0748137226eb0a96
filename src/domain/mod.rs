// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Board entities and value objects.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It performs no I/O; serialization derives are the only framework concern.
//!
//! # Modules
//!
//! - [`board`]: Board entities ([`Sticker`](board::Sticker),
//!   [`TimeSegment`](board::TimeSegment), [`StickerGroup`](board::StickerGroup))
//!   and [`HistoryCapacity`](board::HistoryCapacity)
//! - [`settings`]: View settings ([`BoardSettings`](settings::BoardSettings),
//!   [`ZoomLevel`](settings::ZoomLevel), [`AutosaveDelay`](settings::AutosaveDelay))

pub mod board;
pub mod settings;
