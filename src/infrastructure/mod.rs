// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`file_store`]: One JSON file per key under the data directory
//!   (implements [`KeyValueStore`])
//! - [`memory_store`]: In-process map, for tests and ephemeral boards
//!   (implements [`KeyValueStore`])
//!
//! [`KeyValueStore`]: crate::application::port::KeyValueStore

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
