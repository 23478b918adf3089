//! Per-cookbook ignore rules.
//!
//! Any cookbook directory may carry an `ignore` file with one regular
//! expression per line. Rules accumulate per cookbook name across every root
//! and version, and are applied in one pass once collection has finished.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;

use crate::core::files::CookbookFiles;
use crate::core::version::Version;

/// File name of the per-cookbook ignore list.
pub const IGNORE_FILE: &str = "ignore";

/// Compiled ignore patterns keyed by cookbook name.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: BTreeMap<String, Vec<Regex>>,
}

impl IgnoreRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an ignore file for `name`, returning the number of rules added.
    ///
    /// A missing or unreadable file adds nothing.
    pub fn load_file(&mut self, name: &str, path: &Path) -> usize {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return 0,
        };

        let mut added = 0;
        for line in contents.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match Regex::new(line) {
                Ok(regex) => {
                    self.add(name, regex);
                    added += 1;
                }
                Err(e) => tracing::warn!(
                    "ignoring invalid pattern `{}` in {}: {}",
                    line,
                    path.display(),
                    e
                ),
            }
        }

        if added > 0 {
            tracing::debug!("loaded {} ignore rule(s) for {} from {}", added, name, path.display());
        }
        added
    }

    /// Add a compiled rule for `name`.
    pub fn add(&mut self, name: &str, regex: Regex) {
        self.rules.entry(name.to_string()).or_default().push(regex);
    }

    /// Patterns registered for `name`.
    pub fn patterns(&self, name: &str) -> impl Iterator<Item = &str> {
        self.rules
            .get(name)
            .into_iter()
            .flatten()
            .map(Regex::as_str)
    }

    /// Is `path` excluded from cookbook `name`?
    pub fn is_ignored(&self, name: &str, path: &Path) -> bool {
        let Some(rules) = self.rules.get(name) else {
            return false;
        };
        let path = path.to_string_lossy();
        rules.iter().any(|rule| rule.is_match(&path))
    }

    /// Remove ignored files from every version of every cookbook.
    ///
    /// Returns the number of files removed.
    pub fn apply(&self, settings: &mut BTreeMap<String, BTreeMap<Version, CookbookFiles>>) -> usize {
        let mut removed = 0;

        for (name, versions) in settings.iter_mut() {
            if !self.rules.contains_key(name) {
                continue;
            }
            for (version, files) in versions.iter_mut() {
                let before = files.len();
                files.retain(|_, path| !self.is_ignored(name, path));
                let dropped = before - files.len();
                if dropped > 0 {
                    tracing::debug!("ignored {} file(s) in {} {}", dropped, name, version);
                }
                removed += dropped;
            }
        }

        removed
    }

    /// Number of cookbook names with rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::files::FileCategory;
    use tempfile::TempDir;

    #[test]
    fn test_load_file_skips_comments_and_blanks() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(IGNORE_FILE);
        std::fs::write(&path, "# comment\n\n   \nignoreme\\.rb\n.*\\.swp$\n").unwrap();

        let mut rules = IgnoreRules::new();
        assert_eq!(rules.load_file("openldap", &path), 2);
        assert_eq!(
            rules.patterns("openldap").collect::<Vec<_>>(),
            ["ignoreme\\.rb", ".*\\.swp$"]
        );
    }

    #[test]
    fn test_missing_file_adds_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut rules = IgnoreRules::new();
        assert_eq!(rules.load_file("openldap", &tmp.path().join(IGNORE_FILE)), 0);
        assert!(rules.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(IGNORE_FILE);
        std::fs::write(&path, "(unclosed\nvalid\n").unwrap();

        let mut rules = IgnoreRules::new();
        assert_eq!(rules.load_file("a", &path), 1);
    }

    #[test]
    fn test_apply_is_scoped_by_name() {
        let mut rules = IgnoreRules::new();
        rules.add("a", Regex::new("ignoreme").unwrap());

        let mut files = CookbookFiles::new();
        files.insert(FileCategory::Recipes, "ignoreme.rb", "/k/x/recipes/ignoreme.rb".into());
        files.insert(FileCategory::Recipes, "keep.rb", "/k/x/recipes/keep.rb".into());

        let mut settings = BTreeMap::new();
        let v1 = Version::parse("0.1.0").unwrap();
        settings
            .entry("a".to_string())
            .or_insert_with(BTreeMap::new)
            .insert(v1.clone(), files.clone());
        settings
            .entry("b".to_string())
            .or_insert_with(BTreeMap::new)
            .insert(v1.clone(), files);

        assert_eq!(rules.apply(&mut settings), 1);

        let a = settings["a"][&v1].get(FileCategory::Recipes);
        assert_eq!(a.keys().collect::<Vec<_>>(), ["keep.rb"]);
        assert_eq!(settings["b"][&v1].get(FileCategory::Recipes).len(), 2);
    }
}
