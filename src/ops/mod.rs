//! High-level operations.
//!
//! Entry points used by the CLI and by embedders of the library.

pub mod load;
pub mod reload;

pub use load::{load_catalog, load_catalog_with_plan};
pub use reload::CatalogHandle;
