// SPDX-License-Identifier: MPL-2.0
//! Key-value storage port.

use crate::error::StorageError;

/// String-keyed, string-valued durable store.
///
/// Keys are short ASCII names such as `moodboard-state`. Values are opaque
/// to the store. Methods take `&self` so one store can be shared between the
/// foreground and the autosave task.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
