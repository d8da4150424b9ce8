//! The uniform storage contract every backend satisfies.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use super::error::StorageError;

/// A one-shot, single-consumer byte stream.
///
/// The stream passed to [`FileOperator::save`] and returned from
/// [`FileOperator::fetch`] is finite and non-restartable: it must be
/// drained (or dropped on early abort) exactly once.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static>>;

/// Uniform contract implemented by every storage backend.
///
/// Implementations are immutable after construction and safe to share
/// across concurrent requests behind an `Arc`. Locators returned by
/// [`save`](Self::save) are opaque to callers; each backend can invert its
/// own locators back to a transport-native key.
#[async_trait]
pub trait FileOperator: Send + Sync {
    /// Streams a file to the backend and returns its locator.
    ///
    /// The key is generated via [`generate_path`](Self::generate_path).
    /// A failed or interrupted write never publishes a partial object: the
    /// in-flight write is aborted and no locator is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] on I/O failure.
    async fn save(&self, stream: ByteStream, filename: &str) -> Result<String, StorageError>;

    /// Deletes the object a locator points at.
    ///
    /// Deleting an already-missing object succeeds (idempotent delete),
    /// normalized across all backends so the lifecycle coordinator's
    /// compensation logic stays uniform.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidLocator`] for a locator this backend
    /// did not produce, or [`StorageError::Transport`] on I/O failure.
    async fn delete(&self, locator: &str) -> Result<(), StorageError>;

    /// Opens a lazily-read byte stream for the object a locator points at.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the object is absent, or
    /// [`StorageError::Transport`] on I/O failure.
    async fn fetch(&self, locator: &str) -> Result<ByteStream, StorageError>;

    /// Generates a fresh storage key for an original filename.
    fn generate_path(&self, original_name: &str) -> String;

    /// Validates a candidate upload against this backend's size and
    /// extension policy. Runs before any transport I/O.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileTooLarge`] or
    /// [`StorageError::ExtensionNotAllowed`].
    fn validate(&self, filename: &str, size: u64) -> Result<(), StorageError>;
}
