//! Galley - cookbook discovery and version resolution
//!
//! This crate discovers cookbooks across an ordered list of search roots,
//! overlays files from later roots on top of earlier ones, and answers
//! queries such as "the highest version of `apache2`" or "the highest
//! version of `openldap` satisfying `>= 0.1.0` and `<< 1.0`".

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities for Galley unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides builders for cookbook trees on a temporary filesystem.
#[cfg(test)]
pub mod test_support;

pub use core::{
    catalog::Catalog, catalog::Cookbook, errors::CookbookError, files::FileCategory,
    metadata::CookbookMetadata, version::Version,
};

pub use ops::{load_catalog, CatalogHandle};
pub use resolver::VersionConstraint;
pub use sources::ScanOptions;
pub use util::context::GlobalContext;
