//! Catalog loading.

use crate::core::catalog::Catalog;
use crate::core::errors::CookbookError;
use crate::sources::collect::CollectionPlan;
use crate::sources::scanner::{CookbookScanner, ScanOptions};

/// Scan every configured root and build a fresh catalog.
///
/// The scan is synchronous and all-or-nothing: any malformed metadata
/// aborts the load.
pub fn load_catalog(options: &ScanOptions) -> Result<Catalog, CookbookError> {
    load_catalog_with_plan(options, CollectionPlan::default())
}

/// Like [`load_catalog`], with an explicit collection plan.
pub fn load_catalog_with_plan(
    options: &ScanOptions,
    plan: CollectionPlan,
) -> Result<Catalog, CookbookError> {
    tracing::debug!(
        "loading cookbooks from {} path(s){}",
        options.roots.len(),
        if options.solo { " (solo)" } else { "" }
    );

    let catalog = CookbookScanner::new(options.clone())
        .with_plan(plan)
        .scan()?;

    tracing::info!("Loaded {} cookbook(s)", catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CookbookTree;

    #[test]
    fn test_load_catalog() {
        let tree = CookbookTree::new();
        tree.root("cookbooks").cookbook("apache2").metadata("0.1.0");
        tree.root("cookbooks").cookbook("openldap").metadata("0.2.0");

        let catalog = load_catalog(&tree.options(&["cookbooks"])).unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), ["apache2", "openldap"]);
    }

    #[test]
    fn test_load_catalog_empty_roots() {
        let catalog = load_catalog(&ScanOptions::default()).unwrap();
        assert!(catalog.is_empty());
    }
}
