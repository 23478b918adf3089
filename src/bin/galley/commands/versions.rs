//! `galley versions` command

use anyhow::Result;

use crate::cli::{GlobalArgs, VersionsArgs};

pub fn execute(global: &GlobalArgs, args: VersionsArgs) -> Result<()> {
    let catalog = super::load(global)?;
    let versions = catalog.versions(&args.name)?;

    if global.json {
        return super::print_json(&versions);
    }

    for version in &versions {
        println!("{}", version);
    }

    Ok(())
}
