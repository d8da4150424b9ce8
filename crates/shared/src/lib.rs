//! Shared types for Docvault.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints

pub mod types;

pub use types::{DocumentId, FileId, PageRequest, PageResponse, UserId};
