//! File metadata types.

use chrono::{DateTime, Utc};
use docvault_shared::{DocumentId, FileId, UserId};

/// A stored file's metadata record.
///
/// The core populates this; an external repository owns its persistence.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Unique identifier.
    pub id: FileId,
    /// Original filename as uploaded.
    pub original_name: String,
    /// Opaque backend-specific locator returned by `save`.
    pub storage_locator: String,
    /// File size in bytes (client-declared).
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// User who uploaded the file.
    pub uploader_id: UserId,
    /// Document this file is associated with, if any.
    pub document_id: Option<DocumentId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for uploading a new file.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// Original filename.
    pub filename: String,
    /// Declared file size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// Authenticated uploader.
    pub uploader_id: UserId,
    /// Document to associate the file with, if any.
    pub document_id: Option<DocumentId>,
}

/// Input for creating a file record after a successful save.
#[derive(Debug, Clone)]
pub struct CreateFileInput {
    /// File ID.
    pub id: FileId,
    /// Original filename.
    pub original_name: String,
    /// Storage locator returned by the backend.
    pub storage_locator: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// Uploader.
    pub uploader_id: UserId,
    /// Associated document, if any.
    pub document_id: Option<DocumentId>,
}

/// Filters for listing file records.
#[derive(Debug, Clone, Default)]
pub struct FileListParams {
    /// Only files uploaded by this user.
    pub uploader_id: Option<UserId>,
    /// Only files associated with this document.
    pub document_id: Option<DocumentId>,
    /// Only files with this MIME type.
    pub content_type: Option<String>,
    /// Substring match on the original filename.
    pub search: Option<String>,
}
