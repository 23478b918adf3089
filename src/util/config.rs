//! Configuration file support for Galley.
//!
//! Galley supports two configuration file locations:
//! - Global: `~/.galley/config.toml` - User-wide defaults
//! - Project: `.galley/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Relative cookbook
//! paths are resolved against the directory that holds the config file's
//! `.galley` directory (or the file's own directory for other locations).
//!
//! ```toml
//! [cookbooks]
//! path = ["site-cookbooks", "/var/chef/cookbooks"]
//! solo = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::scanner::ScanOptions;
use crate::util::fs::read_to_string;

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR: &str = ".galley";

/// Name of the config file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Galley configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cookbook search settings
    pub cookbooks: CookbookConfig,
}

/// Cookbook search settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookbookConfig {
    /// Ordered search roots; later roots override earlier ones
    pub path: Vec<PathBuf>,

    /// Solo mode: accept cookbooks without metadata (unset means off)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solo: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        config.resolve_paths(&config_base_dir(path));
        Ok(config)
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Make relative cookbook paths absolute against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in &mut self.cookbooks.path {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.cookbooks.path.is_empty() {
            self.cookbooks.path = other.cookbooks.path;
        }
        if other.cookbooks.solo.is_some() {
            self.cookbooks.solo = other.cookbooks.solo;
        }
    }

    /// Scan options described by this config.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(self.cookbooks.path.iter().cloned())
            .with_solo(self.cookbooks.solo.unwrap_or(false))
    }
}

/// Directory relative cookbook paths are resolved against.
fn config_base_dir(config_path: &Path) -> PathBuf {
    let parent = config_path.parent().unwrap_or(Path::new("."));
    if parent.file_name().is_some_and(|n| n == CONFIG_DIR) {
        parent.parent().unwrap_or(parent).to_path_buf()
    } else {
        parent.to_path_buf()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.galley/config.toml)
/// 2. Global config (~/.galley/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: Option<&Path>) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path.filter(|p| p.exists()) {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    if let Some(project_path) = project_path.filter(|p| p.exists()) {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global galley config directory (~/.galley).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.galley/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Find the nearest project config (.galley/config.toml) at or above `start`.
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cookbooks.path.is_empty());
        assert_eq!(config.cookbooks.solo, None);
    }

    #[test]
    fn test_config_load_resolves_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[cookbooks]
path = ["kitchen", "/srv/cookbooks"]
solo = true
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.cookbooks.path,
            vec![tmp.path().join("kitchen"), PathBuf::from("/srv/cookbooks")]
        );
        assert_eq!(config.cookbooks.solo, Some(true));
    }

    #[test]
    fn test_config_load_rejects_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "[cookbooks\npath = 1");
        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.cookbooks.path = vec![PathBuf::from("/global")];

        let mut project = Config::default();
        project.cookbooks.solo = Some(true);
        base.merge(project);

        assert_eq!(base.cookbooks.path, vec![PathBuf::from("/global")]);
        assert_eq!(base.cookbooks.solo, Some(true));

        let mut project = Config::default();
        project.cookbooks.path = vec![PathBuf::from("/project")];
        base.merge(project);
        assert_eq!(base.cookbooks.path, vec![PathBuf::from("/project")]);
    }

    #[test]
    fn test_load_config_precedence() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let global_path = write_config(global.path(), "[cookbooks]\npath = [\"/global\"]\n");
        let project_path = write_config(project.path(), "[cookbooks]\npath = [\"cookbooks\"]\n");

        let config = load_config(Some(&global_path), Some(&project_path));
        assert_eq!(config.cookbooks.path, vec![project.path().join("cookbooks")]);

        let config = load_config(Some(&global_path), None);
        assert_eq!(config.cookbooks.path, vec![PathBuf::from("/global")]);
    }

    #[test]
    fn test_project_config_can_turn_solo_off() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let global_path = write_config(global.path(), "[cookbooks]\nsolo = true\n");
        let project_path = write_config(project.path(), "[cookbooks]\nsolo = false\n");

        let config = load_config(Some(&global_path), Some(&project_path));
        assert_eq!(config.cookbooks.solo, Some(false));
        assert!(!config.scan_options().solo);

        // A project config that says nothing keeps the global setting
        let silent_path = write_config(project.path(), "[cookbooks]\n");
        let config = load_config(Some(&global_path), Some(&silent_path));
        assert!(config.scan_options().solo);
    }

    #[test]
    fn test_find_project_config_walks_up() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "");
        let nested = tmp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_config(&nested), Some(path));
    }

    #[test]
    fn test_scan_options() {
        let mut config = Config::default();
        config.cookbooks.path = vec![PathBuf::from("/a"), PathBuf::from("/b")];
        config.cookbooks.solo = Some(true);

        let options = config.scan_options();
        assert_eq!(options.roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert!(options.solo);
    }
}
