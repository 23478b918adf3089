//! `galley show` command

use anyhow::Result;

use crate::cli::{GlobalArgs, ShowArgs};
use galley::{CookbookError, Version};

pub fn execute(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let catalog = super::load(global)?;

    let version = match args.version.as_deref() {
        Some(raw) => Some(Version::parse(raw).map_err(|_| CookbookError::InvalidVersion {
            version: raw.to_string(),
        })?),
        None => None,
    };

    let cookbook = catalog.load(&args.name, version.as_ref())?;

    if global.json {
        return super::print_json(cookbook);
    }

    super::print_cookbook(cookbook);

    let metadata = cookbook.metadata();
    if let Some(description) = &metadata.description {
        println!("  description: {}", description);
    }
    if !metadata.dependencies.is_empty() {
        println!("  depends:");
        for (dep, constraint) in &metadata.dependencies {
            match constraint.as_str() {
                Some(c) => println!("    {} ({})", dep, c),
                None => println!("    {}", dep),
            }
        }
    }

    Ok(())
}
