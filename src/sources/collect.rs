//! File collection strategies.
//!
//! Flat categories (attributes, recipes, ...) take only the direct children of
//! their directory and key them by base name, so a later root can shadow a
//! file regardless of where it sat. Nested categories (templates, files, ...)
//! are walked recursively and keyed by relative path, which keeps
//! per-platform subfolders apart.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::core::files::{CollectionKind, CookbookFiles, FileCategory, FileMap};
use crate::util::fs::relative_key;

/// Gathers the files of one category directory.
pub trait Collector {
    /// Add every file under `dir` matching `pattern` to `files`.
    ///
    /// A missing or unreadable directory contributes nothing.
    fn collect(&self, dir: &Path, pattern: &str, files: &mut FileMap);
}

/// Direct children only, keyed by base name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasenameCollector;

impl Collector for BasenameCollector {
    fn collect(&self, dir: &Path, pattern: &str, files: &mut FileMap) {
        if !dir.is_dir() {
            return;
        }

        let pattern_str = format!(
            "{}/{}",
            Pattern::escape(&dir.to_string_lossy()),
            pattern
        );
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let entries = match glob::glob_with(&pattern_str, options) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("invalid glob pattern {}: {}", pattern_str, e);
                return;
            }
        };

        for entry in entries {
            match entry {
                Ok(path) => {
                    if !path.is_file() {
                        continue;
                    }
                    if let Some(name) = path.file_name() {
                        files.insert(name.to_string_lossy().into_owned(), path);
                    }
                }
                Err(e) => tracing::debug!("skipping unreadable entry: {}", e),
            }
        }
    }
}

/// Recursive, keyed by path relative to the category directory.
///
/// Dot-files are included.
#[derive(Debug, Clone, Copy, Default)]
pub struct CascadingCollector;

impl Collector for CascadingCollector {
    fn collect(&self, dir: &Path, pattern: &str, files: &mut FileMap) {
        if !dir.is_dir() {
            return;
        }

        let matcher = match Pattern::new(pattern) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("invalid file pattern {}: {}", pattern, e);
                return;
            }
        };
        let options = MatchOptions {
            require_literal_leading_dot: false,
            ..MatchOptions::new()
        };

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };
            // Follows symlinks, like the basename collector
            if !entry.path().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !matcher.matches_with(&name, options) {
                continue;
            }

            if let Some(key) = relative_key(dir, entry.path()) {
                files.insert(key, entry.into_path());
            }
        }
    }
}

/// Which collector handles which category.
///
/// Chosen once and handed to the scanner.
pub struct CollectionPlan {
    steps: Vec<(FileCategory, Box<dyn Collector>)>,
}

impl CollectionPlan {
    /// An empty plan that collects nothing.
    pub fn empty() -> Self {
        CollectionPlan { steps: Vec::new() }
    }

    /// Add or replace the collector for a category.
    pub fn with(mut self, category: FileCategory, collector: Box<dyn Collector>) -> Self {
        self.steps.retain(|(c, _)| *c != category);
        self.steps.push((category, collector));
        self
    }

    /// Categories covered by this plan, in collection order.
    pub fn categories(&self) -> impl Iterator<Item = FileCategory> + '_ {
        self.steps.iter().map(|(c, _)| *c)
    }

    /// Collect every category of the cookbook rooted at `cookbook_dir`.
    pub fn collect(&self, cookbook_dir: &Path) -> CookbookFiles {
        let mut files = CookbookFiles::new();

        for (category, collector) in &self.steps {
            let dir = cookbook_dir.join(category.dir_name());
            collector.collect(&dir, category.pattern(), files.get_mut(*category));
        }

        files
    }
}

impl Default for CollectionPlan {
    fn default() -> Self {
        FileCategory::ALL
            .into_iter()
            .fold(CollectionPlan::empty(), |plan, category| {
                let collector: Box<dyn Collector> = match category.collection_kind() {
                    CollectionKind::Basename => Box::new(BasenameCollector),
                    CollectionKind::Cascading => Box::new(CascadingCollector),
                };
                plan.with(category, collector)
            })
    }
}

impl std::fmt::Debug for CollectionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.categories()).finish()
    }
}
