//! Pluggable storage backends for uploaded files.
//!
//! Every backend implements the same [`FileOperator`] contract against a
//! different transport (via Apache OpenDAL):
//! - `local` - filesystem under a configured upload directory
//! - `oss` - Aliyun Object Storage Service
//! - `s3` - AWS S3
//! - `cos` - Tencent Cloud Object Storage
//! - `qiniu` - Qiniu Kodo
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    FileOperator (trait)                      │
//! │  save(stream, name) -> locator   │  fetch(locator) -> stream │
//! │  delete(locator)                 │  generate_path / validate │
//! ├──────────────────────────────────────────────────────────────┤
//! │   Local    │    Oss    │    S3    │    Cos    │    Qiniu     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A locator returned by a backend's `save` is accepted by that same
//! backend's `delete` and `fetch` and resolves to the identical object.
//! That round-trip is the correctness invariant of this module.

mod config;
mod cos;
mod error;
mod factory;
mod local;
mod operator;
mod oss;
mod path;
mod qiniu;
mod rules;
mod s3;
mod transfer;

pub use config::{
    CosConfig, DEFAULT_MAX_FILE_SIZE, LocalConfig, OssConfig, QiniuConfig, S3Config,
    StorageConfig, default_allowed_extensions,
};
pub use cos::CosOperator;
pub use error::StorageError;
pub use factory::create_operator;
pub use local::LocalOperator;
pub use operator::{ByteStream, FileOperator};
pub use oss::OssOperator;
pub use path::generate_storage_key;
pub use qiniu::QiniuOperator;
pub use rules::UploadRules;
pub use s3::S3Operator;
