//! `galley resolve` command

use anyhow::Result;

use crate::cli::{GlobalArgs, ResolveArgs};

pub fn execute(global: &GlobalArgs, args: ResolveArgs) -> Result<()> {
    let catalog = super::load(global)?;
    let cookbook = catalog.satisfy_all(&args.name, args.constraints.as_slice())?;

    tracing::debug!(
        "resolved {} to {} under {} constraint(s)",
        args.name,
        cookbook.version(),
        args.constraints.len()
    );

    if global.json {
        return super::print_json(cookbook);
    }

    super::print_cookbook(cookbook);
    Ok(())
}
