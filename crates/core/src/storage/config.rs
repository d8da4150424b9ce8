//! Storage backend configuration types.
//!
//! One strongly-typed config struct per backend, joined in a tagged
//! [`StorageConfig`] sum type. A mismatched tag/config pair is
//! unrepresentable: the backend tag selects the variant at
//! deserialization time, and an unknown tag fails config loading outright
//! instead of failing lazily on the first upload.

use serde::Deserialize;

/// Storage backend configuration, tagged by backend type.
///
/// Loaded once at startup and handed to the factory; each adapter owns
/// its config exclusively and never mutates it.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem under a configured upload directory.
    Local(LocalConfig),
    /// Aliyun Object Storage Service.
    Oss(OssConfig),
    /// AWS S3.
    S3(S3Config),
    /// Tencent Cloud Object Storage.
    Cos(CosConfig),
    /// Qiniu Kodo.
    Qiniu(QiniuConfig),
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalConfig {
    /// Directory uploads are written under.
    pub upload_dir: String,
    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed file extensions (leading dot optional, case-insensitive).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// Aliyun OSS storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OssConfig {
    /// Regional endpoint host, without scheme (e.g. `oss-cn-hangzhou.aliyuncs.com`).
    pub endpoint: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Access key secret.
    pub access_key_secret: String,
    /// Bucket name.
    pub bucket: String,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub base_path: String,
    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed file extensions (leading dot optional, case-insensitive).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// AWS S3 storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// AWS region (e.g. `us-east-1`).
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub base_path: String,
    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed file extensions (leading dot optional, case-insensitive).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// Tencent COS storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CosConfig {
    /// COS region (e.g. `ap-guangzhou`).
    pub region: String,
    /// Bucket name, including the APPID suffix Tencent assigns.
    pub bucket: String,
    /// Secret ID.
    pub secret_id: String,
    /// Secret key.
    pub secret_key: String,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub base_path: String,
    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed file extensions (leading dot optional, case-insensitive).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// Qiniu Kodo storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QiniuConfig {
    /// Access key.
    pub access_key: String,
    /// Secret key.
    pub secret_key: String,
    /// Bucket name.
    pub bucket: String,
    /// Bound download domain for the bucket, without scheme.
    pub domain: String,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub base_path: String,
    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed file extensions (leading dot optional, case-insensitive).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// Default max file size: 10MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Default allowed extensions for document uploads.
#[must_use]
pub fn default_allowed_extensions() -> Vec<String> {
    [".pdf", ".doc", ".docx", ".txt", ".md"]
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

impl StorageConfig {
    /// Loads the `storage` section from layered config files and
    /// `DOCVAULT`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the backend
    /// tag is unknown.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DOCVAULT").separator("__"))
            .build()?;

        config.get("storage")
    }

    /// The backend tag name, as persisted alongside file records.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Oss(_) => "oss",
            Self::S3(_) => "s3",
            Self::Cos(_) => "cos",
            Self::Qiniu(_) => "qiniu",
        }
    }

    /// The configured maximum file size in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        match self {
            Self::Local(cfg) => cfg.max_file_size,
            Self::Oss(cfg) => cfg.max_file_size,
            Self::S3(cfg) => cfg.max_file_size,
            Self::Cos(cfg) => cfg.max_file_size,
            Self::Qiniu(cfg) => cfg.max_file_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_config_from_tagged_value() {
        let config: StorageConfig = serde_json::from_value(serde_json::json!({
            "type": "local",
            "upload_dir": "./uploads",
            "max_file_size": 1_048_576,
            "allowed_extensions": [".pdf", ".txt"],
        }))
        .expect("valid local config");

        assert_eq!(config.name(), "local");
        assert_eq!(config.max_file_size(), 1_048_576);
    }

    #[test]
    fn test_s3_config_defaults() {
        let config: StorageConfig = serde_json::from_value(serde_json::json!({
            "type": "s3",
            "region": "us-east-1",
            "bucket": "docs",
            "access_key_id": "AKIA",
            "secret_access_key": "secret",
        }))
        .expect("valid s3 config");

        let StorageConfig::S3(cfg) = config else {
            panic!("expected s3 variant");
        };
        assert_eq!(cfg.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(cfg.base_path, "");
        assert!(cfg.allowed_extensions.contains(&".pdf".to_string()));
    }

    #[test]
    fn test_unknown_backend_tag_rejected() {
        let result: Result<StorageConfig, _> = serde_json::from_value(serde_json::json!({
            "type": "ftp",
            "host": "example.com",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_shape_rejected() {
        // An oss tag with local-only fields cannot deserialize.
        let result: Result<StorageConfig, _> = serde_json::from_value(serde_json::json!({
            "type": "oss",
            "upload_dir": "./uploads",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_backend_names() {
        let qiniu: StorageConfig = serde_json::from_value(serde_json::json!({
            "type": "qiniu",
            "access_key": "ak",
            "secret_key": "sk",
            "bucket": "docs",
            "domain": "cdn.example.com",
        }))
        .expect("valid qiniu config");
        assert_eq!(qiniu.name(), "qiniu");
    }
}
