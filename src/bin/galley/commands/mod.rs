//! Command implementations

pub mod completions;
pub mod list;
pub mod resolve;
pub mod satisfy;
pub mod show;
pub mod versions;

use anyhow::{bail, Result};

use crate::cli::GlobalArgs;
use galley::util::diagnostic::suggestions;
use galley::{load_catalog, Catalog, Cookbook, FileCategory, GlobalContext};

/// Load the catalog described by config files and command-line overrides.
pub fn load(global: &GlobalArgs) -> Result<Catalog> {
    let mut ctx = GlobalContext::new()?;
    ctx.override_cookbook_paths(global.cookbook_path.clone());
    if global.solo {
        ctx.enable_solo();
    }

    let options = ctx.scan_options();
    if options.roots.is_empty() {
        bail!(
            "no cookbook path configured\n{}",
            suggestions::NO_COOKBOOK_PATH
        );
    }

    Ok(load_catalog(&options)?)
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a cookbook's files grouped by category.
pub fn print_cookbook(cookbook: &Cookbook) {
    println!("{} v{}", cookbook.name(), cookbook.version());

    for category in FileCategory::ALL {
        let files = cookbook.files(category);
        if files.is_empty() {
            continue;
        }
        println!("  {}:", category);
        for (key, path) in files {
            println!("    {} ({})", key, path.display());
        }
    }
}
