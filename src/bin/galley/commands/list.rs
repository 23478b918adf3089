//! `galley list` command

use anyhow::Result;
use serde::Serialize;

use crate::cli::GlobalArgs;

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    version: String,
    versions: usize,
}

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let catalog = super::load(global)?;

    let mut entries = Vec::with_capacity(catalog.len());
    for (name, cookbook) in &catalog {
        entries.push(Entry {
            name,
            version: cookbook.version().to_string(),
            versions: catalog.versions(name)?.len(),
        });
    }

    if global.json {
        return super::print_json(&entries);
    }

    if entries.is_empty() {
        eprintln!("No cookbooks found");
        return Ok(());
    }

    for entry in &entries {
        if entry.versions > 1 {
            println!("{} v{} ({} versions)", entry.name, entry.version, entry.versions);
        } else {
            println!("{} v{}", entry.name, entry.version);
        }
    }

    Ok(())
}
