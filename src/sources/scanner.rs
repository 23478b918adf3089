//! Cookbook scanner.
//!
//! Walks the configured search roots in order, classifies every cookbook
//! directory, collects its files and folds duplicate (name, version) pairs
//! together with later roots winning. Ignore rules are applied once all
//! roots have been read, then metadata is parsed and the catalog assembled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::catalog::{Catalog, Cookbook};
use crate::core::errors::CookbookError;
use crate::core::files::CookbookFiles;
use crate::core::metadata::{CookbookMetadata, METADATA_FILE};
use crate::core::version::Version;
use crate::sources::collect::CollectionPlan;
use crate::sources::ignore::{IgnoreRules, IGNORE_FILE};
use crate::sources::layout::CookbookLayout;
use crate::util::fs::{dir_name, list_subdirs};

/// Files collected so far, by cookbook name then version.
pub type CookbookSettings = BTreeMap<String, BTreeMap<Version, CookbookFiles>>;

/// Inputs to a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Search roots; later roots override earlier ones.
    pub roots: Vec<PathBuf>,

    /// Accept metadata-less cookbooks that have a `recipes/` directory.
    pub solo: bool,
}

impl ScanOptions {
    /// Options for the given roots, solo mode off.
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        ScanOptions {
            roots: roots.into_iter().map(Into::into).collect(),
            solo: false,
        }
    }

    /// Toggle solo mode.
    pub fn with_solo(mut self, solo: bool) -> Self {
        self.solo = solo;
        self
    }
}

/// One-shot scanner over a list of search roots.
#[derive(Debug)]
pub struct CookbookScanner {
    options: ScanOptions,
    plan: CollectionPlan,
    ignore: IgnoreRules,
    settings: CookbookSettings,
}

impl CookbookScanner {
    /// Create a scanner using the default collection plan.
    pub fn new(options: ScanOptions) -> Self {
        CookbookScanner {
            options,
            plan: CollectionPlan::default(),
            ignore: IgnoreRules::new(),
            settings: CookbookSettings::new(),
        }
    }

    /// Use a different collection plan.
    pub fn with_plan(mut self, plan: CollectionPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Scan every root and build the catalog.
    pub fn scan(mut self) -> Result<Catalog, CookbookError> {
        let roots = std::mem::take(&mut self.options.roots);

        for root in &roots {
            self.scan_root(root)?;
        }

        let removed = self.ignore.apply(&mut self.settings);
        if removed > 0 {
            tracing::debug!("ignore rules removed {} file(s)", removed);
        }

        self.build_catalog()
    }

    fn scan_root(&mut self, root: &Path) -> Result<(), CookbookError> {
        if !root.is_dir() {
            tracing::warn!("cookbook path {} does not exist, skipping", root.display());
            return Ok(());
        }

        tracing::debug!("scanning cookbook path {}", root.display());

        for cookbook_dir in list_subdirs(root) {
            let Some(name) = dir_name(&cookbook_dir) else {
                continue;
            };
            self.scan_cookbook(&name, &cookbook_dir)?;
        }

        Ok(())
    }

    fn scan_cookbook(&mut self, name: &str, dir: &Path) -> Result<(), CookbookError> {
        let layout = CookbookLayout::detect(dir, self.options.solo);
        tracing::trace!("{} at {} is {:?}", name, dir.display(), layout);

        match layout {
            CookbookLayout::SingleVersion => {
                let (version, files) = self.process(name, dir, None)?;
                self.record(name, version, files);
            }
            CookbookLayout::Solo => {
                let (version, files) = self.process(name, dir, Some(Version::solo_default()))?;
                self.record(name, version, files);
            }
            CookbookLayout::MultiVersion => {
                for version_dir in list_subdirs(dir) {
                    let Some(raw) = dir_name(&version_dir) else {
                        continue;
                    };
                    let version = match Version::parse(&raw) {
                        Ok(version) => version,
                        Err(e) => {
                            tracing::warn!(
                                "skipping {}: not a version directory of {} ({})",
                                version_dir.display(),
                                name,
                                e
                            );
                            continue;
                        }
                    };
                    let (version, files) = self.process(name, &version_dir, Some(version))?;
                    self.record(name, version, files);
                }
            }
        }

        Ok(())
    }

    /// Collect one cookbook version rooted at `path`.
    ///
    /// Without an explicit version, it is read from `metadata.json`.
    fn process(
        &mut self,
        name: &str,
        path: &Path,
        version: Option<Version>,
    ) -> Result<(Version, CookbookFiles), CookbookError> {
        self.ignore.load_file(name, &path.join(IGNORE_FILE));

        let mut files = self.plan.collect(path);

        let metadata_path = path.join(METADATA_FILE);
        let mut declared = None;
        if metadata_path.is_file() {
            files.add_metadata_file(metadata_path.clone());
            if version.is_none() {
                let metadata = CookbookMetadata::load(&metadata_path)?;
                declared = Some(metadata.parsed_version(&metadata_path)?);
            }
        }

        let version = version
            .or(declared)
            .unwrap_or_else(Version::metadata_default);

        Ok((version, files))
    }

    fn record(&mut self, name: &str, version: Version, files: CookbookFiles) {
        let versions = self.settings.entry(name.to_string()).or_default();

        match versions.get_mut(&version) {
            Some(existing) => {
                tracing::debug!("merging another copy of {} {}", name, version);
                existing.merge(files);
            }
            None => {
                versions.insert(version, files);
            }
        }
    }

    fn build_catalog(self) -> Result<Catalog, CookbookError> {
        let mut catalog = Catalog::new(self.ignore);

        for (name, versions) in self.settings {
            for (version, files) in versions {
                let metadata = load_metadata(&name, &version, &files)?;
                catalog.insert(Cookbook::new(name.clone(), version, files, metadata));
            }
        }

        tracing::debug!("loaded {} cookbook(s)", catalog.len());
        Ok(catalog)
    }
}

/// Metadata for one version, applying each metadata file in root order.
fn load_metadata(
    name: &str,
    version: &Version,
    files: &CookbookFiles,
) -> Result<CookbookMetadata, CookbookError> {
    let mut metadata = CookbookMetadata::for_cookbook(name, version);

    for path in files.metadata_files() {
        metadata.apply(CookbookMetadata::load(path)?);
    }

    Ok(metadata)
}
