//! Cookbook metadata (`metadata.json`).
//!
//! Only `name` and `version` matter to the loader. Dependency data and the
//! remaining fields are carried through for downstream consumers.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::CookbookError;
use crate::core::version::Version;

/// File name of cookbook metadata.
pub const METADATA_FILE: &str = "metadata.json";

/// Parsed cookbook metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookbookMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Supported platforms and their version constraints
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platforms: BTreeMap<String, Value>,

    /// Cookbook dependencies, consumed by the run-list expander
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub recommendations: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub suggestions: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conflicting: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub providing: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub replacing: BTreeMap<String, Value>,

    /// Recipe descriptions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub recipes: BTreeMap<String, Value>,

    /// Any keys not modelled above
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,

    /// Whether `version` came from the file rather than the default
    #[serde(skip)]
    declares_version: bool,
}

fn default_version() -> String {
    Version::metadata_default().to_string()
}

impl CookbookMetadata {
    /// Metadata for a cookbook version that ships no metadata file.
    pub fn for_cookbook(name: impl Into<String>, version: &Version) -> Self {
        CookbookMetadata {
            name: name.into(),
            version: version.to_string(),
            description: None,
            long_description: None,
            maintainer: None,
            maintainer_email: None,
            license: None,
            platforms: BTreeMap::new(),
            dependencies: BTreeMap::new(),
            recommendations: BTreeMap::new(),
            suggestions: BTreeMap::new(),
            conflicting: BTreeMap::new(),
            providing: BTreeMap::new(),
            replacing: BTreeMap::new(),
            recipes: BTreeMap::new(),
            extra: BTreeMap::new(),
            declares_version: false,
        }
    }

    /// Read and parse a metadata file.
    pub fn load(path: &Path) -> Result<Self, CookbookError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CookbookError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&contents, path)
    }

    /// Parse metadata JSON; `path` is only used for error reporting.
    pub fn from_json(contents: &str, path: &Path) -> Result<Self, CookbookError> {
        let malformed = |e: serde_json::Error| CookbookError::MalformedMetadata {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let value: Value = serde_json::from_str(contents).map_err(malformed)?;
        let declares_version = value.get("version").is_some();

        let mut metadata: CookbookMetadata = serde_json::from_value(value).map_err(malformed)?;
        metadata.declares_version = declares_version;

        // Surface a bad declared version here rather than at resolve time.
        metadata.parsed_version(path)?;
        Ok(metadata)
    }

    /// Did the metadata file set `version` itself?
    pub fn declares_version(&self) -> bool {
        self.declares_version
    }

    /// The declared version as a [`Version`].
    pub fn parsed_version(&self, path: &Path) -> Result<Version, CookbookError> {
        Version::parse(&self.version).map_err(|e| CookbookError::MalformedMetadata {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Overlay fields from metadata found later in the search order.
    ///
    /// Scalars set on `later` replace ours; maps are merged key by key.
    pub fn apply(&mut self, later: CookbookMetadata) {
        if !later.name.is_empty() {
            self.name = later.name;
        }
        if later.declares_version {
            self.version = later.version;
            self.declares_version = true;
        }

        macro_rules! overlay_opt {
            ($($field:ident),*) => {
                $(if later.$field.is_some() {
                    self.$field = later.$field;
                })*
            };
        }
        macro_rules! overlay_map {
            ($($field:ident),*) => {
                $(self.$field.extend(later.$field);)*
            };
        }

        overlay_opt!(
            description,
            long_description,
            maintainer,
            maintainer_email,
            license
        );
        overlay_map!(
            platforms,
            dependencies,
            recommendations,
            suggestions,
            conflicting,
            providing,
            replacing,
            recipes,
            extra
        );
    }
}
