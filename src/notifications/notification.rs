// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::error::Error;

/// How a notification is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed.
    #[default]
    Success,
    /// Informational message.
    Info,
    /// Something failed but the board is intact.
    Warning,
    /// Requires attention.
    Error,
}

impl Severity {
    /// Whether the message belongs on the error stream rather than regular
    /// output.
    #[must_use]
    pub fn is_problem(self) -> bool {
        matches!(self, Severity::Warning | Severity::Error)
    }
}

/// A message for the user, resolved through i18n at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Builds an error notification from a crate error, keeping its message
    /// as the `error` argument.
    pub fn from_error(error: &Error) -> Self {
        Self::error(error.i18n_key()).with_arg("error", error.to_string())
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn only_warnings_and_errors_are_problems() {
        assert!(!Notification::success("saved").severity().is_problem());
        assert!(!Notification::info("empty").severity().is_problem());
        assert!(Notification::warning("repaired").severity().is_problem());
        assert!(Notification::error("boom").severity().is_problem());
    }

    #[test]
    fn from_error_uses_nested_key() {
        let error: Error = StorageError::PermissionDenied {
            key: "moodboard-state".into(),
        }
        .into();
        let notification = Notification::from_error(&error);
        assert_eq!(notification.message_key(), "error-storage-permission");
        assert_eq!(notification.severity(), Severity::Error);
        assert!(notification
            .message_args()
            .iter()
            .any(|(name, value)| name == "error" && value.contains("moodboard-state")));
    }
}
