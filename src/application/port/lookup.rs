// SPDX-License-Identifier: MPL-2.0
//! Geocoding and link-preview port definitions.
//!
//! Lookups run outside the core. On success their results are turned into a
//! ready-made [`StickerDraft`] and handed to `ADD_STICKER`; the reducer never
//! waits on a network call.

use crate::domain::board::{GeoLocation, SegmentId, StickerDraft, StickerId, StickerType};
use std::fmt;

// =============================================================================
// LookupError
// =============================================================================

/// Errors reported by lookup adapters.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The query matched nothing.
    NotFound(String),

    /// The query or URL was rejected before any lookup.
    InvalidInput(String),

    /// The remote service could not be reached.
    Unavailable(String),
}

impl LookupError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LookupError::NotFound(_) => "error-lookup-not-found",
            LookupError::InvalidInput(_) => "error-lookup-invalid",
            LookupError::Unavailable(_) => "error-lookup-unavailable",
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound(query) => write!(f, "No match for '{query}'"),
            LookupError::InvalidInput(msg) => write!(f, "Invalid lookup input: {msg}"),
            LookupError::Unavailable(msg) => write!(f, "Lookup service unavailable: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

// =============================================================================
// Geocoding
// =============================================================================

/// A named place returned by a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPlace {
    pub name: String,
    pub location: GeoLocation,
}

impl GeoPlace {
    /// Builds a map sticker draft pinned to this place.
    #[must_use]
    pub fn to_draft(&self, id: impl Into<StickerId>, segment: impl Into<SegmentId>) -> StickerDraft {
        StickerDraft {
            location: Some(self.location),
            title: Some(self.name.clone()),
            ..StickerDraft::new(id, StickerType::Map, segment)
        }
    }
}

/// Resolves free-text place queries.
pub trait Geocoder: Send + Sync {
    /// Returns candidate places, best match first.
    fn geocode(&self, query: &str) -> Result<Vec<GeoPlace>, LookupError>;
}

// =============================================================================
// Link previews
// =============================================================================

/// Metadata fetched for a URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPreview {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl LinkPreview {
    /// Builds a link sticker draft. A missing or blank title falls back to
    /// the URL.
    #[must_use]
    pub fn to_draft(&self, id: impl Into<StickerId>, segment: impl Into<SegmentId>) -> StickerDraft {
        StickerDraft {
            content: Some(self.url.clone()),
            title: self
                .title
                .clone()
                .filter(|title| !title.trim().is_empty()),
            ..StickerDraft::new(id, StickerType::Link, segment)
        }
    }
}

/// Fetches metadata for URLs.
pub trait LinkPreviewer: Send + Sync {
    fn preview(&self, url: &str) -> Result<LinkPreview, LookupError>;
}

/// Geocodes `query` and drafts a map sticker for the best match.
pub fn draft_from_place(
    geocoder: &impl Geocoder,
    query: &str,
    id: impl Into<StickerId>,
    segment: impl Into<SegmentId>,
) -> Result<StickerDraft, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::InvalidInput("empty place query".to_string()));
    }
    let places = geocoder.geocode(query)?;
    let best = places
        .first()
        .ok_or_else(|| LookupError::NotFound(query.to_string()))?;
    Ok(best.to_draft(id, segment))
}

/// Fetches a preview for `url` and drafts a link sticker from it.
pub fn draft_from_link(
    previewer: &impl LinkPreviewer,
    url: &str,
    id: impl Into<StickerId>,
    segment: impl Into<SegmentId>,
) -> Result<StickerDraft, LookupError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(LookupError::InvalidInput(format!("not a web URL: {url}")));
    }
    let preview = previewer.preview(url)?;
    Ok(preview.to_draft(id, segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::StickerKind;

    struct FixedGeocoder(Vec<GeoPlace>);

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, _query: &str) -> Result<Vec<GeoPlace>, LookupError> {
            Ok(self.0.clone())
        }
    }

    struct EchoPreviewer;

    impl LinkPreviewer for EchoPreviewer {
        fn preview(&self, url: &str) -> Result<LinkPreview, LookupError> {
            Ok(LinkPreview {
                url: url.to_string(),
                title: Some(" ".to_string()),
                ..LinkPreview::default()
            })
        }
    }

    #[test]
    fn best_place_becomes_map_sticker() {
        let geocoder = FixedGeocoder(vec![GeoPlace {
            name: "Lisbon".into(),
            location: GeoLocation {
                lat: 38.72,
                lng: -9.14,
                zoom: 12.0,
            },
        }]);
        let draft = draft_from_place(&geocoder, "lisbon", "m1", "day-1").unwrap();
        let sticker = draft.into_sticker().unwrap();
        match sticker.kind {
            StickerKind::Map { location } => assert_eq!(location.zoom, 12.0),
            other => panic!("expected map sticker, got {other:?}"),
        }
    }

    #[test]
    fn no_match_is_not_found() {
        let geocoder = FixedGeocoder(Vec::new());
        assert_eq!(
            draft_from_place(&geocoder, "atlantis", "m1", "day-1"),
            Err(LookupError::NotFound("atlantis".into()))
        );
        assert!(matches!(
            draft_from_place(&geocoder, "  ", "m1", "day-1"),
            Err(LookupError::InvalidInput(_))
        ));
    }

    #[test]
    fn blank_link_title_falls_back_to_url() {
        let draft = draft_from_link(&EchoPreviewer, "https://example.org", "l1", "day-1").unwrap();
        let sticker = draft.into_sticker().unwrap();
        assert_eq!(
            sticker.kind,
            StickerKind::Link {
                content: "https://example.org".into(),
                title: "https://example.org".into(),
            }
        );
    }

    #[test]
    fn non_web_urls_are_rejected() {
        assert!(matches!(
            draft_from_link(&EchoPreviewer, "ftp://example.org", "l1", "day-1"),
            Err(LookupError::InvalidInput(_))
        ));
    }
}
