//! File lifecycle orchestration.
//!
//! This module coordinates a storage backend and an external metadata
//! repository as compensating-action pairs (no distributed transaction
//! exists across the two):
//! - upload: validate, save to storage, persist metadata; a failed persist
//!   triggers a best-effort compensating delete of the stored object
//! - delete: ownership gate, physical delete, then metadata delete; a
//!   failed physical delete leaves the metadata record in place
//! - associate: metadata-only rebind of a file's document
//!
//! A file is only ever observable in two steady states: fully saved
//! (object + record) or fully absent. The in-between states never leak.

mod error;
mod service;
mod types;

pub use error::FileError;
pub use service::{FileRepository, FileService};
pub use types::{CreateFileInput, FileListParams, FileRecord, UploadInput};
