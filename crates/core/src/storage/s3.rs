//! AWS S3 storage backend.

use async_trait::async_trait;
use opendal::{Operator, services};

use super::config::S3Config;
use super::error::StorageError;
use super::operator::{ByteStream, FileOperator};
use super::path::generate_storage_key;
use super::rules::UploadRules;
use super::transfer;

/// Storage backend for AWS S3.
///
/// Locators are virtual-hosted regional URLs,
/// `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
pub struct S3Operator {
    op: Operator,
    rules: UploadRules,
    config: S3Config,
}

impl S3Operator {
    /// Creates an S3 backend from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the S3 client cannot be
    /// built from the region/bucket/credentials.
    pub fn new(config: S3Config) -> Result<Self, StorageError> {
        let builder = services::S3::default()
            .region(&config.region)
            .bucket(&config.bucket)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key);

        let op = Operator::new(builder)
            .map_err(|err| StorageError::configuration(err.to_string()))?
            .finish();

        Ok(Self {
            op,
            rules: UploadRules::new(config.max_file_size, &config.allowed_extensions),
            config,
        })
    }

    fn url_prefix(&self) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/",
            self.config.bucket, self.config.region
        )
    }

    fn locator_for(&self, key: &str) -> String {
        format!("{}{key}", self.url_prefix())
    }

    fn object_key(&self, locator: &str) -> Result<String, StorageError> {
        locator
            .strip_prefix(&self.url_prefix())
            .filter(|key| !key.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| StorageError::InvalidLocator(locator.to_string()))
    }
}

#[async_trait]
impl FileOperator for S3Operator {
    async fn save(&self, stream: ByteStream, filename: &str) -> Result<String, StorageError> {
        let key = self.generate_path(filename);

        transfer::write_stream(&self.op, &key, stream).await?;

        Ok(self.locator_for(&key))
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
        generate_storage_key(&self.config.base_path, original_name)
    }

    fn validate(&self, filename: &str, size: u64) -> Result<(), StorageError> {
        self.rules.check(filename, size)
    }
}
