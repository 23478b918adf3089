//! Core data structures for Galley.
//!
//! This module contains the foundational types used throughout Galley:
//! - Versions and their ordering
//! - Categorized cookbook file bundles and metadata
//! - The read-only cookbook catalog and its query API
//! - Error types

pub mod catalog;
pub mod errors;
pub mod files;
pub mod metadata;
pub mod version;

pub use catalog::{Catalog, Cookbook};
pub use errors::CookbookError;
pub use files::{CollectionKind, CookbookFiles, FileCategory, FileMap};
pub use metadata::{CookbookMetadata, METADATA_FILE};
pub use version::{Version, VersionParseError};
