//! Backend selection.

use std::sync::Arc;

use super::config::StorageConfig;
use super::cos::CosOperator;
use super::error::StorageError;
use super::local::LocalOperator;
use super::operator::FileOperator;
use super::oss::OssOperator;
use super::qiniu::QiniuOperator;
use super::s3::S3Operator;

/// Constructs the backend adapter a configuration selects.
///
/// The tagged [`StorageConfig`] makes an unsupported backend or a
/// mismatched config shape unrepresentable; the only failure mode left is
/// the transport client refusing its configuration, which surfaces here at
/// startup rather than on the first upload.
///
/// # Errors
///
/// Returns [`StorageError::Configuration`] if the selected backend's
/// client cannot be built.
pub fn create_operator(config: StorageConfig) -> Result<Arc<dyn FileOperator>, StorageError> {
    match config {
        StorageConfig::Local(cfg) => Ok(Arc::new(LocalOperator::new(cfg)?)),
        StorageConfig::Oss(cfg) => Ok(Arc::new(OssOperator::new(cfg)?)),
        StorageConfig::S3(cfg) => Ok(Arc::new(S3Operator::new(cfg)?)),
        StorageConfig::Cos(cfg) => Ok(Arc::new(CosOperator::new(cfg)?)),
        StorageConfig::Qiniu(cfg) => Ok(Arc::new(QiniuOperator::new(cfg)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::{LocalConfig, S3Config, default_allowed_extensions};

    #[test]
    fn test_create_local_operator() {
        let operator = create_operator(StorageConfig::Local(LocalConfig {
            upload_dir: "./uploads".to_string(),
            max_file_size: 1024,
            allowed_extensions: default_allowed_extensions(),
        }))
        .expect("local backend");

        assert!(operator.validate("a.pdf", 100).is_ok());
        assert!(operator.generate_path("a.pdf").starts_with("./uploads/"));
    }

    #[test]
    fn test_create_s3_operator() {
        let operator = create_operator(StorageConfig::S3(S3Config {
            region: "us-east-1".to_string(),
            bucket: "docs".to_string(),
            access_key_id: "AKIA".to_string(),
            secret_access_key: "secret".to_string(),
            base_path: "files".to_string(),
            max_file_size: 1024,
            allowed_extensions: default_allowed_extensions(),
        }))
        .expect("s3 backend");

        assert!(operator.generate_path("a.pdf").starts_with("files/"));
    }
}
