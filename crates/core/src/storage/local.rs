//! Local filesystem storage backend.

use async_trait::async_trait;
use opendal::{Operator, services};

use super::config::LocalConfig;
use super::error::StorageError;
use super::operator::{ByteStream, FileOperator};
use super::path::generate_storage_key;
use super::rules::UploadRules;
use super::transfer;

/// Storage backend writing to the local filesystem.
///
/// Locators are filesystem paths under the configured upload directory,
/// e.g. `./uploads/2026/03/07/{uuid}.pdf`. Intended for development and
/// single-node deployments.
pub struct LocalOperator {
    op: Operator,
    rules: UploadRules,
    upload_dir: String,
}

impl LocalOperator {
    /// Creates a local backend rooted at the configured upload directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the filesystem operator
    /// cannot be built.
    pub fn new(config: LocalConfig) -> Result<Self, StorageError> {
        let upload_dir = config.upload_dir.trim_end_matches('/').to_string();

        let builder = services::Fs::default().root(&upload_dir);
        let op = Operator::new(builder)
            .map_err(|err| StorageError::configuration(err.to_string()))?
            .finish();

        Ok(Self {
            op,
            rules: UploadRules::new(config.max_file_size, &config.allowed_extensions),
            upload_dir,
        })
    }

    /// Resolves a previously-issued locator back to a key relative to the
    /// upload directory.
    fn object_key(&self, locator: &str) -> Result<String, StorageError> {
        locator
            .strip_prefix(&format!("{}/", self.upload_dir))
            .filter(|key| !key.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| StorageError::InvalidLocator(locator.to_string()))
    }
}

#[async_trait]
impl FileOperator for LocalOperator {
    async fn save(&self, stream: ByteStream, filename: &str) -> Result<String, StorageError> {
        let locator = self.generate_path(filename);
        let key = self.object_key(&locator)?;

        transfer::write_stream(&self.op, &key, stream).await?;

        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> Result<(), StorageError> {
        let key = self.object_key(locator)?;
        transfer::delete_object(&self.op, &key).await
    }

    async fn fetch(&self, locator: &str) -> Result<ByteStream, StorageError> {
        let key = self.object_key(locator)?;
        transfer::read_stream(&self.op, &key).await
    }

    fn generate_path(&self, original_name: &str) -> String {
        generate_storage_key(&self.upload_dir, original_name)
    }

    fn validate(&self, filename: &str, size: u64) -> Result<(), StorageError> {
        self.rules.check(filename, size)
    }
}
