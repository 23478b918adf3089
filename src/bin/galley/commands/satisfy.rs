//! `galley satisfy` command

use anyhow::Result;

use crate::cli::{GlobalArgs, SatisfyArgs};

pub fn execute(global: &GlobalArgs, args: SatisfyArgs) -> Result<()> {
    let catalog = super::load(global)?;
    let versions = catalog.satisfy(&args.name, args.constraint.as_deref())?;

    if global.json {
        return super::print_json(&versions);
    }

    if versions.is_empty() {
        eprintln!(
            "No version of `{}` matches `{}`",
            args.name,
            args.constraint.unwrap_or_default()
        );
        return Ok(());
    }

    for version in &versions {
        println!("{}", version);
    }

    Ok(())
}
