//! Cookbook catalog and query API.
//!
//! The catalog is built once by the scanner and is read-only afterwards.
//! Queries never mutate it, so a shared `Arc<Catalog>` needs no locking.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::core::errors::CookbookError;
use crate::core::files::{CookbookFiles, FileCategory, FileMap};
use crate::core::metadata::CookbookMetadata;
use crate::core::version::Version;
use crate::resolver::{self, VersionConstraint};
use crate::sources::ignore::IgnoreRules;

/// One version of a cookbook: its files and resolved metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Cookbook {
    name: String,
    version: Version,
    files: CookbookFiles,
    metadata: CookbookMetadata,
}

impl Cookbook {
    /// Create a cookbook.
    pub fn new(
        name: impl Into<String>,
        version: Version,
        files: CookbookFiles,
        metadata: CookbookMetadata,
    ) -> Self {
        Cookbook {
            name: name.into(),
            version,
            files,
            metadata,
        }
    }

    /// Cookbook name (its directory base name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog version of this cookbook.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Resolved metadata.
    pub fn metadata(&self) -> &CookbookMetadata {
        &self.metadata
    }

    /// The full categorized file bundle.
    pub fn files_bundle(&self) -> &CookbookFiles {
        &self.files
    }

    /// Files of one category, keyed by collection key.
    pub fn files(&self, category: FileCategory) -> &FileMap {
        self.files.get(category)
    }

    fn paths(&self, category: FileCategory) -> impl Iterator<Item = &Path> {
        self.files.get(category).values().map(PathBuf::as_path)
    }

    pub fn attribute_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Attributes)
    }

    pub fn definition_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Definitions)
    }

    pub fn recipe_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Recipes)
    }

    pub fn library_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Libraries)
    }

    pub fn template_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Templates)
    }

    pub fn remote_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Files)
    }

    pub fn resource_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Resources)
    }

    pub fn provider_files(&self) -> impl Iterator<Item = &Path> {
        self.paths(FileCategory::Providers)
    }
}

impl Serialize for Cookbook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let files: BTreeMap<&str, &FileMap> = self
            .files
            .iter()
            .map(|(category, map)| (category.dir_name(), map))
            .collect();

        let mut state = serializer.serialize_struct("Cookbook", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("files", &files)?;
        state.serialize_field("metadata_files", self.files.metadata_files())?;
        state.serialize_field("metadata", &self.metadata)?;
        state.end()
    }
}

/// Every known cookbook, by name then version.
#[derive(Debug, Default)]
pub struct Catalog {
    cookbooks: BTreeMap<String, BTreeMap<Version, Arc<Cookbook>>>,
    ignore_rules: IgnoreRules,
}

impl Catalog {
    /// Create an empty catalog carrying the ignore rules it was built with.
    pub fn new(ignore_rules: IgnoreRules) -> Self {
        Catalog {
            cookbooks: BTreeMap::new(),
            ignore_rules,
        }
    }

    /// Add a cookbook, replacing any existing entry for the same version.
    pub fn insert(&mut self, cookbook: Cookbook) {
        self.cookbooks
            .entry(cookbook.name.clone())
            .or_default()
            .insert(cookbook.version.clone(), Arc::new(cookbook));
    }

    fn entries(&self, name: &str) -> Result<&BTreeMap<Version, Arc<Cookbook>>, CookbookError> {
        self.cookbooks
            .get(name)
            .filter(|versions| !versions.is_empty())
            .ok_or_else(|| CookbookError::unknown_cookbook(name))
    }

    fn version_strings(&self, name: &str) -> Vec<String> {
        self.cookbooks
            .get(name)
            .map(|versions| versions.keys().map(Version::to_string).collect())
            .unwrap_or_default()
    }

    /// The highest version of `name`.
    pub fn resolve(&self, name: &str) -> Result<&Cookbook, CookbookError> {
        self.entries(name)?
            .values()
            .next_back()
            .map(Arc::as_ref)
            .ok_or_else(|| CookbookError::unknown_cookbook(name))
    }

    /// Exactly `version` of `name`.
    pub fn resolve_version(&self, name: &str, version: &Version) -> Result<&Cookbook, CookbookError> {
        self.entries(name)?
            .get(version)
            .map(Arc::as_ref)
            .ok_or_else(|| CookbookError::NotFound {
                name: name.to_string(),
                version: Some(version.to_string()),
                available: self.version_strings(name),
            })
    }

    /// `version` of `name` if given, otherwise the highest.
    pub fn load(&self, name: &str, version: Option<&Version>) -> Result<&Cookbook, CookbookError> {
        match version {
            Some(version) => self.resolve_version(name, version),
            None => self.resolve(name),
        }
    }

    /// Shared handle to a cookbook, for callers that outlive the borrow.
    pub fn get_arc(&self, name: &str, version: Option<&Version>) -> Result<Arc<Cookbook>, CookbookError> {
        let cookbook = self.load(name, version)?;
        let versions = self.entries(name)?;
        versions
            .get(cookbook.version())
            .cloned()
            .ok_or_else(|| CookbookError::unknown_cookbook(name))
    }

    /// All versions of `name`, ascending.
    pub fn versions(&self, name: &str) -> Result<Vec<Version>, CookbookError> {
        Ok(self.entries(name)?.keys().cloned().collect())
    }

    /// Metadata of `version` of `name`, or of the highest version.
    pub fn metadata(
        &self,
        name: &str,
        version: Option<&Version>,
    ) -> Result<&CookbookMetadata, CookbookError> {
        self.load(name, version).map(Cookbook::metadata)
    }

    /// Versions of `name` matching `constraint`, ascending.
    ///
    /// Without a constraint every version is returned.
    pub fn satisfy(&self, name: &str, constraint: Option<&str>) -> Result<Vec<Version>, CookbookError> {
        let versions = self.versions(name)?;
        match constraint {
            None => Ok(versions),
            Some(raw) => {
                let constraint = VersionConstraint::parse(raw)?;
                Ok(resolver::satisfy(&versions, Some(&constraint)))
            }
        }
    }

    /// The highest version of `name` satisfying every constraint.
    pub fn satisfy_all<S: AsRef<str>>(
        &self,
        name: &str,
        constraints: &[S],
    ) -> Result<&Cookbook, CookbookError> {
        let versions = self.versions(name)?;
        let version = resolver::satisfy_all(name, &versions, constraints)?;
        self.resolve_version(name, &version)
    }

    /// Highest version of every cookbook, by name.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.cookbooks.iter(),
        }
    }

    /// Cookbook names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    /// Is there any version of `name`?
    pub fn contains(&self, name: &str) -> bool {
        self.entries(name).is_ok()
    }

    /// Number of distinct cookbook names.
    pub fn len(&self) -> usize {
        self.cookbooks.values().filter(|v| !v.is_empty()).count()
    }

    /// True when the catalog holds no cookbook.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ignore rules accumulated while scanning.
    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.ignore_rules
    }
}

/// Iterator over `(name, highest version)` in name order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, BTreeMap<Version, Arc<Cookbook>>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Cookbook);

    fn next(&mut self) -> Option<Self::Item> {
        for (name, versions) in self.inner.by_ref() {
            if let Some(cookbook) = versions.values().next_back() {
                return Some((name.as_str(), cookbook.as_ref()));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a str, &'a Cookbook);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
