//! Cookbook directory layouts.

use std::path::Path;

use crate::core::metadata::METADATA_FILE;

/// How versions are laid out inside a cookbook directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookbookLayout {
    /// `metadata.json` at the top level: one version, declared in the metadata.
    SingleVersion,
    /// Solo mode, no metadata, but a `recipes/` directory: one `0.0` version.
    Solo,
    /// Every subdirectory is a version directory named by its version.
    MultiVersion,
}

impl CookbookLayout {
    /// Classify the cookbook directory at `path`.
    pub fn detect(path: &Path, solo: bool) -> Self {
        if path.join(METADATA_FILE).is_file() {
            CookbookLayout::SingleVersion
        } else if solo && path.join("recipes").is_dir() {
            CookbookLayout::Solo
        } else {
            CookbookLayout::MultiVersion
        }
    }
}
