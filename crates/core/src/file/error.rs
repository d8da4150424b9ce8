//! File lifecycle error types.

use docvault_shared::FileId;
use thiserror::Error;

use crate::storage::StorageError;

/// File lifecycle operation errors.
#[derive(Debug, Error)]
pub enum FileError {
    /// File record not found.
    #[error("file not found: {0}")]
    NotFound(FileId),

    /// Caller does not own the file record.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),

    /// Metadata persist failed and the compensating delete of the stored
    /// object failed too, leaving an orphaned object behind.
    ///
    /// Both causes are kept distinct: the persist failure explains the
    /// rejected upload, the cleanup failure names the object an operator
    /// must remove by hand.
    #[error(
        "metadata persist failed ({persist}); compensating delete of '{locator}' also failed ({cleanup})"
    )]
    CleanupFailed {
        /// Locator of the orphaned object.
        locator: String,
        /// The original persistence failure.
        persist: Box<FileError>,
        /// The compensating delete failure.
        cleanup: StorageError,
    },
}

impl FileError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: FileId) -> Self {
        Self::NotFound(id)
    }

    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
