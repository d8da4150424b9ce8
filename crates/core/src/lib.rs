//! Core storage and file lifecycle logic for Docvault.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! HTTP routing and metadata persistence are external collaborators that consume
//! the types defined here.
//!
//! # Modules
//!
//! - `storage` - Pluggable storage backends behind a uniform contract
//! - `file` - File lifecycle orchestration (upload, download, delete, associate)

pub mod file;
pub mod storage;
