// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! The board core never performs I/O itself. Everything outside it is reached
//! through one of these traits, implemented by adapters in
//! [`crate::infrastructure`] or by the embedding application.
//!
//! # Available Ports
//!
//! - [`storage`]: Durable key-value store for boards and view settings
//! - [`lookup`]: Geocoding and link-metadata lookups that produce sticker drafts
//! - [`export`]: Rasterization/document export of a captured board
//!
//! # Design Notes
//!
//! - All traits use domain types only
//! - Traits are `Send + Sync` so adapters can be shared with background tasks
//! - Methods return `Result` with port-specific error types
//! - No `async fn`; callers decide where blocking adapters run
//!
//! # Example
//!
//! ```
//! use moodboard::application::port::KeyValueStore;
//! use moodboard::infrastructure::MemoryStore;
//!
//! let store = MemoryStore::new();
//! store.set("greeting", "hello").unwrap();
//! assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

pub mod export;
pub mod lookup;
pub mod storage;

pub use export::{BoardExporter, CaptureScope, CapturedSegment, ExportError, ExportFormat};
pub use lookup::{GeoPlace, Geocoder, LinkPreview, LinkPreviewer, LookupError};
pub use storage::KeyValueStore;
