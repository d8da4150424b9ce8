//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Declared file size exceeds the configured maximum.
    #[error("file size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge {
        /// Declared file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// File extension not in the configured allow-set.
    #[error("file type '{extension}' is not allowed")]
    ExtensionNotAllowed {
        /// The rejected extension (lowercased, including the dot).
        extension: String,
    },

    /// Object not found in storage.
    #[error("object not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Locator string does not belong to this backend.
    #[error("locator does not belong to this backend: {0}")]
    InvalidLocator(String),

    /// Backend client could not be constructed from its configuration.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Transport-level I/O failure (potentially transient).
    #[error("storage operation failed: {0}")]
    Transport(String),
}

impl StorageError {
    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create an extension not allowed error.
    #[must_use]
    pub fn extension_not_allowed(extension: impl Into<String>) -> Self {
        Self::ExtensionNotAllowed {
            extension: extension.into(),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether this error represents a missing object.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StorageError::file_too_large(2048, 1024).to_string(),
            "file size 2048 bytes exceeds maximum allowed 1024 bytes"
        );
        assert_eq!(
            StorageError::extension_not_allowed(".exe").to_string(),
            "file type '.exe' is not allowed"
        );
        assert_eq!(
            StorageError::not_found("2026/01/02/abc.pdf").to_string(),
            "object not found: 2026/01/02/abc.pdf"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(StorageError::not_found("missing").is_not_found());
        assert!(!StorageError::transport("boom").is_not_found());
    }
}
