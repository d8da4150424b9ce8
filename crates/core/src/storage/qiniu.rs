//! Qiniu Kodo storage backend.

use async_trait::async_trait;
use opendal::{Operator, services};

use super::config::QiniuConfig;
use super::error::StorageError;
use super::operator::{ByteStream, FileOperator};
use super::path::generate_storage_key;
use super::rules::UploadRules;
use super::transfer;

/// Storage backend for Qiniu Kodo.
///
/// Locators are download-domain URLs, `https://{domain}/{key}`, using the
/// domain bound to the bucket.
pub struct QiniuOperator {
    op: Operator,
    rules: UploadRules,
    config: QiniuConfig,
}

impl QiniuOperator {
    /// Creates a Kodo backend from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the Kodo client cannot
    /// be built from the domain/bucket/credentials.
    pub fn new(config: QiniuConfig) -> Result<Self, StorageError> {
        let builder = services::Kodo::default()
            .endpoint(&format!("https://{}", config.domain))
            .bucket(&config.bucket)
            .access_key(&config.access_key)
            .secret_key(&config.secret_key);

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
        format!("https://{}/", self.config.domain)
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
impl FileOperator for QiniuOperator {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::default_allowed_extensions;

    fn operator() -> QiniuOperator {
        QiniuOperator::new(QiniuConfig {
            access_key: "ak".to_string(),
            secret_key: "sk".to_string(),
            bucket: "docs".to_string(),
            domain: "cdn.example.com".to_string(),
            base_path: String::new(),
            max_file_size: 1024,
            allowed_extensions: default_allowed_extensions(),
        })
        .expect("qiniu operator")
    }

    #[test]
    fn test_locator_key_round_trip() {
        let op = operator();
        let key = "2026/03/07/abc.txt";

        let locator = op.locator_for(key);
        assert_eq!(locator, "https://cdn.example.com/2026/03/07/abc.txt");
        assert_eq!(op.object_key(&locator).unwrap(), key);
    }

    #[test]
    fn test_foreign_locator_rejected() {
        let op = operator();
        let err = op
            .object_key("https://other.example.com/2026/03/07/abc.txt")
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidLocator(_)));
    }
}
