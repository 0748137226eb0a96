// SPDX-License-Identifier: MPL-2.0
//! Identifier newtypes for board entities.
//!
//! Identifiers are caller-supplied strings. The reducer never invents them so
//! that every transition stays deterministic and testable; see [`fresh_id`]
//! for the helper the presentation layer uses to mint new ones.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a [`TimeSegment`](super::TimeSegment).
    SegmentId
);

string_id!(
    /// Identifier of a [`Sticker`](super::Sticker).
    StickerId
);

string_id!(
    /// Identifier of a [`StickerGroup`](super::StickerGroup).
    GroupId
);

/// Builds a fresh identifier from a prefix and caller-provided entropy.
///
/// The entropy (a timestamp, a counter, random bits) travels in the action
/// payload; nothing here reads a clock or a random source.
#[must_use]
pub fn fresh_id(prefix: &str, entropy: u64) -> String {
    format!("{prefix}-{entropy:x}")
}
