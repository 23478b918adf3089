//! Shared catalog handle with atomic replacement.
//!
//! Readers take a snapshot `Arc<Catalog>` and keep using it for as long as
//! they like. A reload scans into a brand-new catalog first and only then
//! swaps the pointer, so nobody ever sees a partially built catalog.

use std::sync::{Arc, RwLock};

use crate::core::catalog::{Catalog, Cookbook};
use crate::core::errors::CookbookError;
use crate::core::version::Version;
use crate::ops::load::load_catalog;
use crate::sources::scanner::ScanOptions;

/// A swappable reference to the current catalog.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    /// Wrap an already built catalog.
    pub fn new(catalog: Catalog) -> Self {
        CatalogHandle {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Scan and wrap a catalog.
    pub fn load(options: &ScanOptions) -> Result<Self, CookbookError> {
        Ok(Self::new(load_catalog(options)?))
    }

    /// Snapshot of the current catalog.
    pub fn current(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// A cookbook from the current catalog, kept alive across later reloads.
    pub fn cookbook(
        &self,
        name: &str,
        version: Option<&Version>,
    ) -> Result<Arc<Cookbook>, CookbookError> {
        self.current().get_arc(name, version)
    }

    /// Replace the current catalog, returning the previous one.
    pub fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }

    /// Re-scan and swap in the result.
    ///
    /// On failure the current catalog stays in place.
    pub fn reload(&self, options: &ScanOptions) -> Result<Arc<Catalog>, CookbookError> {
        let fresh = load_catalog(options)?;
        self.swap(fresh);
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CookbookTree;

    #[test]
    fn test_reload_swaps_catalog() {
        let tree = CookbookTree::new();
        tree.root("cookbooks").cookbook("apache2").metadata("0.1.0");
        let options = tree.options(&["cookbooks"]);

        let handle = CatalogHandle::load(&options).unwrap();
        let before = handle.current();

        tree.root("cookbooks").cookbook("apache2").metadata("0.2.0");
        let after = handle.reload(&options).unwrap();

        // The old snapshot is untouched.
        assert_eq!(before.resolve("apache2").unwrap().version().to_string(), "0.1.0");
        assert_eq!(after.resolve("apache2").unwrap().version().to_string(), "0.2.0");
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_cookbook_outlives_reload() {
        let tree = CookbookTree::new();
        tree.root("cookbooks").cookbook("apache2").metadata("0.1.0");
        let options = tree.options(&["cookbooks"]);

        let handle = CatalogHandle::load(&options).unwrap();
        let held = handle.cookbook("apache2", None).unwrap();

        tree.root("cookbooks").cookbook("apache2").metadata("0.2.0");
        handle.reload(&options).unwrap();

        assert_eq!(held.version().to_string(), "0.1.0");
        let fresh = handle.cookbook("apache2", None).unwrap();
        assert_eq!(fresh.version().to_string(), "0.2.0");
        assert!(handle.cookbook("unknown_cb", None).is_err());
    }

    #[test]
    fn test_failed_reload_keeps_previous_catalog() {
        let tree = CookbookTree::new();
        tree.root("cookbooks").cookbook("apache2").metadata("0.1.0");
        let options = tree.options(&["cookbooks"]);

        let handle = CatalogHandle::load(&options).unwrap();
        tree.root("cookbooks").cookbook("broken").raw_metadata("{");

        assert!(handle.reload(&options).is_err());
        assert!(handle.current().contains("apache2"));
        assert!(!handle.current().contains("broken"));
    }
}
