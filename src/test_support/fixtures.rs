//! Test fixtures for cookbook trees.
//!
//! Builds search roots full of cookbooks inside a temporary directory:
//!
//! ```rust,ignore
//! let tree = CookbookTree::new();
//! tree.root("kitchen")
//!     .cookbook("openldap")
//!     .metadata("0.1.0")
//!     .file("recipes/default.rb");
//! let options = tree.options(&["kitchen"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::sources::scanner::ScanOptions;

/// A temporary directory holding one or more search roots.
pub struct CookbookTree {
    tmp: TempDir,
}

impl CookbookTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        CookbookTree {
            tmp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Base directory of the tree.
    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// Get (creating if needed) the search root `name`.
    pub fn root(&self, name: &str) -> RootFixture {
        let path = self.tmp.path().join(name);
        fs::create_dir_all(&path).expect("failed to create root");
        RootFixture { path }
    }

    /// Scan options over the named roots, in the given order.
    pub fn options(&self, roots: &[&str]) -> ScanOptions {
        ScanOptions::new(roots.iter().map(|r| self.tmp.path().join(r)))
    }
}

impl Default for CookbookTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A search root inside a [`CookbookTree`].
pub struct RootFixture {
    path: PathBuf,
}

impl RootFixture {
    /// Directory of this root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get (creating if needed) a cookbook directory.
    ///
    /// `rel` is `name` or `name/version` for multi-version layouts.
    pub fn cookbook(&self, rel: &str) -> CookbookFixture {
        let path = self.path.join(rel);
        fs::create_dir_all(&path).expect("failed to create cookbook dir");
        let name = rel.split('/').next().unwrap_or(rel).to_string();
        CookbookFixture { path, name }
    }
}

/// A cookbook (or cookbook version) directory under construction.
pub struct CookbookFixture {
    path: PathBuf,
    name: String,
}

impl CookbookFixture {
    /// Directory of this cookbook.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a `metadata.json` declaring `version`.
    pub fn metadata(self, version: &str) -> Self {
        let json = format!(r#"{{"name": "{}", "version": "{}"}}"#, self.name, version);
        self.raw_metadata(&json)
    }

    /// Write `metadata.json` verbatim.
    pub fn raw_metadata(self, json: &str) -> Self {
        self.file_with("metadata.json", json)
    }

    /// Create an empty source file at `rel`.
    pub fn file(self, rel: &str) -> Self {
        self.file_with(rel, "# fixture\n")
    }

    /// Create a file at `rel` with the given contents.
    pub fn file_with(self, rel: &str, contents: &str) -> Self {
        let path = self.path.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write fixture file");
        self
    }

    /// Write an `ignore` file with one pattern per line.
    pub fn ignore(self, patterns: &[&str]) -> Self {
        let mut contents = patterns.join("\n");
        contents.push('\n');
        self.file_with("ignore", &contents)
    }
}
