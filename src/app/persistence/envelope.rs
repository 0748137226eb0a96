// SPDX-License-Identifier: MPL-2.0
//! Versioned JSON envelope wrapped around every persisted payload.

use crate::error::{Error, Result, StateError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Schema version written for boards.
pub const BOARD_SCHEMA_VERSION: u32 = 1;

/// Schema version written for board settings.
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// `{version, state, timestamp}` as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub version: u32,
    pub state: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn new(version: u32, state: T) -> Self {
        Self {
            version,
            state,
            timestamp: Utc::now(),
        }
    }
}

/// Serializes `state` into a versioned envelope stamped with the current time.
pub fn encode<T: Serialize>(version: u32, state: &T) -> Result<String> {
    let envelope = Envelope::new(version, state);
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses an envelope, refusing any version other than `expected`.
///
/// The version is checked before the payload is deserialized so that a
/// future schema is reported as a version mismatch rather than as malformed
/// data.
pub fn decode<T: DeserializeOwned>(raw: &str, expected: u32) -> Result<Envelope<T>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| Error::Validation("envelope has no numeric version".to_string()))?;
    let version = u32::try_from(version)
        .map_err(|_| Error::Validation(format!("envelope version {version} out of range")))?;
    if version != expected {
        return Err(StateError::UnsupportedVersion {
            found: version,
            supported: expected,
        }
        .into());
    }
    Ok(serde_json::from_value(value)?)
}
