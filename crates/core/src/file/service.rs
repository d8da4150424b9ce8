//! File lifecycle service implementation.

use std::sync::Arc;

use docvault_shared::{DocumentId, FileId, PageRequest, PageResponse, UserId};
use tracing::{error, warn};

use super::error::FileError;
use super::types::{CreateFileInput, FileListParams, FileRecord, UploadInput};
use crate::storage::{ByteStream, FileOperator};

/// Repository trait for file metadata persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait FileRepository: Send + Sync {
    /// Create a new file record.
    fn create(
        &self,
        input: CreateFileInput,
    ) -> impl std::future::Future<Output = Result<FileRecord, FileError>> + Send;

    /// Find a file record by ID.
    fn find_by_id(
        &self,
        id: FileId,
    ) -> impl std::future::Future<Output = Result<Option<FileRecord>, FileError>> + Send;

    /// Rebind a file record's document association.
    fn update_document(
        &self,
        id: FileId,
        document_id: Option<DocumentId>,
    ) -> impl std::future::Future<Output = Result<FileRecord, FileError>> + Send;

    /// Delete a file record by ID.
    fn delete(
        &self,
        id: FileId,
    ) -> impl std::future::Future<Output = Result<bool, FileError>> + Send;

    /// List file records matching the filters, with the total count.
    fn list(
        &self,
        params: FileListParams,
        page: PageRequest,
    ) -> impl std::future::Future<Output = Result<(Vec<FileRecord>, u64), FileError>> + Send;
}

/// File lifecycle coordinator.
///
/// Orchestrates one storage backend and one metadata repository. The
/// backend is shared behind an `Arc` and immutable, so the service is safe
/// to share across concurrent request tasks.
pub struct FileService<R: FileRepository> {
    operator: Arc<dyn FileOperator>,
    repo: Arc<R>,
}

impl<R: FileRepository> FileService<R> {
    /// Create a new file service.
    #[must_use]
    pub fn new(operator: Arc<dyn FileOperator>, repo: Arc<R>) -> Self {
        Self { operator, repo }
    }

    /// Upload a file: validate, save to storage, persist metadata.
    ///
    /// Validation runs before any byte moves. If metadata persistence
    /// fails after a successful save, the stored object is removed by a
    /// compensating delete and the persistence error is surfaced; if that
    /// delete fails too, both causes are reported in
    /// [`FileError::CleanupFailed`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The upload violates the backend's size or extension policy
    /// - The storage write fails
    /// - Metadata persistence fails
    pub async fn upload(
        &self,
        input: UploadInput,
        stream: ByteStream,
    ) -> Result<FileRecord, FileError> {
        self.operator.validate(&input.filename, input.size)?;

        let locator = self.operator.save(stream, &input.filename).await?;

        let create = CreateFileInput {
            id: FileId::new(),
            original_name: input.filename,
            storage_locator: locator.clone(),
            size: input.size,
            content_type: input.content_type,
            uploader_id: input.uploader_id,
            document_id: input.document_id,
        };

        match self.repo.create(create).await {
            Ok(record) => Ok(record),
            Err(persist) => match self.operator.delete(&locator).await {
                Ok(()) => {
                    warn!(%locator, "removed stored object after metadata persist failure");
                    Err(persist)
                }
                Err(cleanup) => {
                    error!(
                        %locator,
                        persist = %persist,
                        cleanup = %cleanup,
                        "orphaned object left in storage, manual cleanup required"
                    );
                    Err(FileError::CleanupFailed {
                        locator,
                        persist: Box::new(persist),
                        cleanup,
                    })
                }
            },
        }
    }

    /// Get a file record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or the repository fails.
    pub async fn get(&self, id: FileId) -> Result<FileRecord, FileError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| FileError::not_found(id))
    }

    /// Open a file for reading: the record plus a one-shot byte stream.
    ///
    /// The caller is responsible for draining the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing, the stored object is
    /// gone, or the storage read fails.
    pub async fn download(&self, id: FileId) -> Result<(FileRecord, ByteStream), FileError> {
        let record = self.get(id).await?;
        let stream = self.operator.fetch(&record.storage_locator).await?;
        Ok((record, stream))
    }

    /// Delete a file: physical object first, then the metadata record.
    ///
    /// Only the uploader may delete a file. If the physical delete fails
    /// the metadata record is kept, so no record ever points at nothing.
    /// An already-missing physical object counts as deleted and metadata
    /// removal proceeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record is missing
    /// - The caller is not the uploader
    /// - The physical delete or metadata delete fails
    pub async fn delete(&self, id: FileId, user_id: UserId) -> Result<(), FileError> {
        let record = self.get(id).await?;

        if record.uploader_id != user_id {
            return Err(FileError::forbidden("only the uploader can delete a file"));
        }

        self.operator.delete(&record.storage_locator).await?;

        self.repo.delete(id).await?;
        Ok(())
    }

    /// Rebind a file's document association. Metadata-only; never touches
    /// the storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing, the caller is not the
    /// uploader, or the repository fails.
    pub async fn associate(
        &self,
        id: FileId,
        user_id: UserId,
        document_id: Option<DocumentId>,
    ) -> Result<FileRecord, FileError> {
        let record = self.get(id).await?;

        if record.uploader_id != user_id {
            return Err(FileError::forbidden("only the uploader can update a file"));
        }

        self.repo.update_document(id, document_id).await
    }

    /// List file records matching the filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list(
        &self,
        params: FileListParams,
        page: PageRequest,
    ) -> Result<PageResponse<FileRecord>, FileError> {
        let (records, total) = self.repo.list(params, page.clone()).await?;
        Ok(PageResponse::new(records, page.page, page.per_page, total))
    }
}
