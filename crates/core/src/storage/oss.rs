//! Aliyun OSS storage backend.

use async_trait::async_trait;
use opendal::{Operator, services};

use super::config::OssConfig;
use super::error::StorageError;
use super::operator::{ByteStream, FileOperator};
use super::path::generate_storage_key;
use super::rules::UploadRules;
use super::transfer;

/// Storage backend for Aliyun Object Storage Service.
///
/// Locators are virtual-hosted bucket URLs,
/// `https://{bucket}.{endpoint}/{key}`. The URL-building and URL-parsing
/// sides live next to each other here so they cannot drift apart.
pub struct OssOperator {
    op: Operator,
    rules: UploadRules,
    config: OssConfig,
}

impl OssOperator {
    /// Creates an OSS backend from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the OSS client cannot be
    /// built from the endpoint/bucket/credentials.
    pub fn new(config: OssConfig) -> Result<Self, StorageError> {
        let builder = services::Oss::default()
            .endpoint(&format!("https://{}", config.endpoint))
            .bucket(&config.bucket)
            .access_key_id(&config.access_key_id)
            .access_key_secret(&config.access_key_secret);

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
        format!("https://{}.{}/", self.config.bucket, self.config.endpoint)
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
impl FileOperator for OssOperator {
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
