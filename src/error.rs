// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy shared by the reducer, the persistence bridge and the CLI.
//!
//! Every error maps to a Fluent message key through `i18n_key()` so that the
//! presentation layer can notify the user without matching on variants.

use thiserror::Error;

/// Top-level error type for board operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed persisted data, settings, or action payload.
    #[error("Validation Error: {0}")]
    Validation(String),

    /// Key-value store failure.
    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),

    /// Version mismatch or structurally invalid state.
    #[error("State Error: {0}")]
    State(#[from] StateError),

    /// A board file could not be imported.
    #[error("Import Error: {0}")]
    Import(String),

    /// A board could not be exported.
    #[error("Export Error: {0}")]
    Export(#[from] crate::application::port::ExportError),

    /// Unknown sticker discriminant in `AddSticker` / `UpdateSticker`.
    #[error("Invalid sticker type: {0}")]
    InvalidStickerType(String),

    /// `settings.toml` could not be read or written.
    #[error("Config Error: {0}")]
    Config(String),

    /// Filesystem failure outside the key-value store.
    #[error("I/O Error: {0}")]
    Io(String),
}

impl Error {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Validation(_) => "error-validation",
            Error::Storage(err) => err.i18n_key(),
            Error::State(err) => err.i18n_key(),
            Error::Import(_) => "error-import",
            Error::Export(_) => "error-export",
            Error::InvalidStickerType(_) => "error-invalid-sticker-type",
            Error::Config(_) => "error-config",
            Error::Io(_) => "error-io",
        }
    }
}

/// Kind of entity an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Segment,
    Sticker,
    Group,
    Template,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Segment => "segment",
            EntityKind::Sticker => "sticker",
            EntityKind::Group => "group",
            EntityKind::Template => "template",
        };
        f.write_str(name)
    }
}

/// Structural state errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A persisted envelope carries a schema version this build does not know.
    #[error("unsupported schema version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// An insert collided with an existing identifier.
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: EntityKind, id: String },

    /// A sticker references a segment that does not exist.
    #[error("unknown segment '{0}'")]
    UnknownSegment(String),

    /// The state violates one of its cross-reference invariants.
    #[error("inconsistent state: {0}")]
    Inconsistent(String),
}

impl StateError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StateError::UnsupportedVersion { .. } => "error-state-unsupported-version",
            StateError::DuplicateId { .. } => "error-state-duplicate-id",
            StateError::UnknownSegment(_) => "error-state-unknown-segment",
            StateError::Inconsistent(_) => "error-state-inconsistent",
        }
    }
}

/// Failures reported by a [`KeyValueStore`](crate::application::port::KeyValueStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    #[error("permission denied for '{key}'")]
    PermissionDenied { key: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StorageError::Read { .. } => "error-storage-read",
            StorageError::Write { .. } => "error-storage-write",
            StorageError::QuotaExceeded { .. } => "error-storage-quota",
            StorageError::PermissionDenied { .. } => "error-storage-permission",
            StorageError::Unavailable(_) => "error-storage-unavailable",
        }
    }

    /// Classifies an I/O failure on `key` into a storage error.
    pub(crate) fn from_io(key: &str, err: &std::io::Error, writing: bool) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                key: key.to_string(),
            },
            std::io::ErrorKind::StorageFull | std::io::ErrorKind::QuotaExceeded => {
                StorageError::QuotaExceeded {
                    key: key.to_string(),
                }
            }
            _ if writing => StorageError::Write {
                key: key.to_string(),
                message: err.to_string(),
            },
            _ => StorageError::Read {
                key: key.to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
