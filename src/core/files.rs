//! Categorized cookbook files.
//!
//! A cookbook version is a bundle of eight file categories. Each category
//! maps a collection key (a base name or a path relative to the category
//! directory) to the absolute path of the file that won the overlay.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Mapping from collection key to file path.
pub type FileMap = BTreeMap<String, PathBuf>;

/// How files of a category are gathered from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Only direct children, keyed by base name.
    Basename,
    /// Recursive, keyed by relative path.
    Cascading,
}

/// A category of cookbook source artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Attributes,
    Definitions,
    Recipes,
    Libraries,
    Templates,
    Files,
    Resources,
    Providers,
}

impl FileCategory {
    /// Every category, in collection order.
    pub const ALL: [FileCategory; 8] = [
        FileCategory::Attributes,
        FileCategory::Definitions,
        FileCategory::Recipes,
        FileCategory::Libraries,
        FileCategory::Templates,
        FileCategory::Files,
        FileCategory::Resources,
        FileCategory::Providers,
    ];

    /// Directory name inside a cookbook.
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::Attributes => "attributes",
            FileCategory::Definitions => "definitions",
            FileCategory::Recipes => "recipes",
            FileCategory::Libraries => "libraries",
            FileCategory::Templates => "templates",
            FileCategory::Files => "files",
            FileCategory::Resources => "resources",
            FileCategory::Providers => "providers",
        }
    }

    /// Glob matched against file names in this category.
    pub fn pattern(&self) -> &'static str {
        match self {
            FileCategory::Templates => "*.erb",
            FileCategory::Files => "*",
            _ => "*.rb",
        }
    }

    /// Default collection strategy for this category.
    pub fn collection_kind(&self) -> CollectionKind {
        match self {
            FileCategory::Attributes
            | FileCategory::Definitions
            | FileCategory::Recipes
            | FileCategory::Libraries => CollectionKind::Basename,
            FileCategory::Templates
            | FileCategory::Files
            | FileCategory::Resources
            | FileCategory::Providers => CollectionKind::Cascading,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The files making up one version of a cookbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookbookFiles {
    categories: [FileMap; 8],
    metadata_files: Vec<PathBuf>,
}

impl CookbookFiles {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files of one category.
    pub fn get(&self, category: FileCategory) -> &FileMap {
        &self.categories[category.index()]
    }

    /// Mutable access to one category.
    pub fn get_mut(&mut self, category: FileCategory) -> &mut FileMap {
        &mut self.categories[category.index()]
    }

    /// Insert a file, replacing any previous file with the same key.
    pub fn insert(&mut self, category: FileCategory, key: impl Into<String>, path: PathBuf) {
        self.get_mut(category).insert(key.into(), path);
    }

    /// Record a metadata file.
    pub fn add_metadata_file(&mut self, path: PathBuf) {
        if !self.metadata_files.contains(&path) {
            self.metadata_files.push(path);
        }
    }

    /// Metadata files in discovery order.
    pub fn metadata_files(&self) -> &[PathBuf] {
        &self.metadata_files
    }

    /// Iterate over every category with its files.
    pub fn iter(&self) -> impl Iterator<Item = (FileCategory, &FileMap)> {
        FileCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Drop every file whose path fails the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(FileCategory, &Path) -> bool) {
        for category in FileCategory::ALL {
            self.get_mut(category)
                .retain(|_, path| keep(category, path.as_path()));
        }
    }

    /// Deep-merge a bundle found later in the search order into this one.
    ///
    /// Keys unique to either side survive; shared keys take the later value.
    pub fn merge(&mut self, later: CookbookFiles) {
        let CookbookFiles {
            categories,
            metadata_files,
        } = later;

        for (mine, theirs) in self.categories.iter_mut().zip(categories) {
            mine.extend(theirs);
        }
        for path in metadata_files {
            self.add_metadata_file(path);
        }
    }

    /// Total number of collected files across categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(BTreeMap::len).sum()
    }

    /// True when no category holds a file.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins_and_union() {
        let mut early = CookbookFiles::new();
        early.insert(FileCategory::Attributes, "default.rb", "/a/default.rb".into());
        early.insert(FileCategory::Attributes, "robinson.rb", "/a/robinson.rb".into());
        early.add_metadata_file("/a/metadata.json".into());

        let mut late = CookbookFiles::new();
        late.insert(FileCategory::Attributes, "default.rb", "/b/default.rb".into());
        late.insert(FileCategory::Templates, "ubuntu/foo.erb", "/b/t/ubuntu/foo.erb".into());
        late.add_metadata_file("/b/metadata.json".into());

        early.merge(late);

        let attrs = early.get(FileCategory::Attributes);
        assert_eq!(attrs["default.rb"], PathBuf::from("/b/default.rb"));
        assert_eq!(attrs["robinson.rb"], PathBuf::from("/a/robinson.rb"));
        assert_eq!(early.get(FileCategory::Templates).len(), 1);
        assert_eq!(
            early.metadata_files(),
            &[PathBuf::from("/a/metadata.json"), PathBuf::from("/b/metadata.json")]
        );
        assert_eq!(early.len(), 3);
    }

    #[test]
    fn test_category_strategies() {
        let basename: Vec<_> = FileCategory::ALL
            .into_iter()
            .filter(|c| c.collection_kind() == CollectionKind::Basename)
            .map(|c| c.dir_name())
            .collect();
        assert_eq!(basename, ["attributes", "definitions", "recipes", "libraries"]);
        assert_eq!(FileCategory::Files.pattern(), "*");
        assert_eq!(FileCategory::Templates.pattern(), "*.erb");
    }

    #[test]
    fn test_retain_by_path() {
        let mut files = CookbookFiles::new();
        files.insert(FileCategory::Recipes, "keep.rb", "/r/keep.rb".into());
        files.insert(FileCategory::Recipes, "drop.rb", "/r/drop.rb".into());

        files.retain(|_, path| !path.ends_with("drop.rb"));

        assert!(files.get(FileCategory::Recipes).contains_key("keep.rb"));
        assert!(!files.get(FileCategory::Recipes).contains_key("drop.rb"));
    }
}
