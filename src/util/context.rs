//! Global context for Galley operations.
//!
//! Provides centralized access to the working directory and the merged
//! configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::sources::scanner::ScanOptions;
use crate::util::config::{find_project_config, global_config_path, load_config, Config};

/// Working directory plus merged global/project configuration.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    cwd: PathBuf,
    config: Config,
    project_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context for the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context rooted at `cwd`.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let global = global_config_path();
        let project_config = find_project_config(&cwd);
        let config = load_config(global.as_deref(), project_config.as_deref());

        GlobalContext {
            cwd,
            config,
            project_config,
        }
    }

    /// Create a context with an explicit configuration.
    pub fn with_config(cwd: PathBuf, config: Config) -> Self {
        GlobalContext {
            cwd,
            config,
            project_config: None,
        }
    }

    /// Current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the project config in effect, if any.
    pub fn project_config(&self) -> Option<&Path> {
        self.project_config.as_deref()
    }

    /// Replace the configured cookbook paths (e.g. from the command line).
    ///
    /// Relative paths are taken relative to the working directory.
    pub fn override_cookbook_paths(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.config.cookbooks.path = paths
            .into_iter()
            .map(|p| if p.is_relative() { self.cwd.join(p) } else { p })
            .collect();
    }

    /// Force solo mode on.
    pub fn enable_solo(&mut self) {
        self.config.cookbooks.solo = Some(true);
    }

    /// Scan options for the current configuration.
    pub fn scan_options(&self) -> ScanOptions {
        self.config.scan_options()
    }
}
