//! Tencent COS storage backend.

use async_trait::async_trait;
use opendal::{Operator, services};

use super::config::CosConfig;
use super::error::StorageError;
use super::operator::{ByteStream, FileOperator};
use super::path::generate_storage_key;
use super::rules::UploadRules;
use super::transfer;

/// Storage backend for Tencent Cloud Object Storage.
///
/// Locators are bucket URLs, `https://{bucket}.cos.{region}.myqcloud.com/{key}`.
pub struct CosOperator {
    op: Operator,
    rules: UploadRules,
    config: CosConfig,
}

impl CosOperator {
    /// Creates a COS backend from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the COS client cannot be
    /// built from the region/bucket/credentials.
    pub fn new(config: CosConfig) -> Result<Self, StorageError> {
        let builder = services::Cos::default()
            .endpoint(&format!("https://cos.{}.myqcloud.com", config.region))
            .bucket(&config.bucket)
            .secret_id(&config.secret_id)
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
        format!(
            "https://{}.cos.{}.myqcloud.com/",
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
impl FileOperator for CosOperator {
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

    fn operator() -> CosOperator {
        CosOperator::new(CosConfig {
            region: "ap-guangzhou".to_string(),
            bucket: "docs-1250000000".to_string(),
            secret_id: "id".to_string(),
            secret_key: "key".to_string(),
            base_path: "attachments".to_string(),
            max_file_size: 1024,
            allowed_extensions: default_allowed_extensions(),
        })
        .expect("cos operator")
    }

    #[test]
    fn test_locator_key_round_trip() {
        let op = operator();
        let key = "attachments/2026/03/07/abc.docx";

        let locator = op.locator_for(key);
        assert_eq!(
            locator,
            "https://docs-1250000000.cos.ap-guangzhou.myqcloud.com/attachments/2026/03/07/abc.docx"
        );
        assert_eq!(op.object_key(&locator).unwrap(), key);
    }

    #[test]
    fn test_generate_path_under_base_path() {
        let op = operator();
        let key = op.generate_path("minutes.md");
        assert!(key.starts_with("attachments/"));
        assert!(key.ends_with(".md"));
    }

    #[test]
    fn test_foreign_locator_rejected() {
        let op = operator();
        let err = op
            .object_key("https://docs-1250000000.cos.ap-beijing.myqcloud.com/a.pdf")
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidLocator(_)));
    }
}
