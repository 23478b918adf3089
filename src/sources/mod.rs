//! Cookbook sources.
//!
//! Discovers cookbooks on disk: classifies directory layouts, collects
//! files per category and applies per-cookbook ignore rules.

pub mod collect;
pub mod ignore;
pub mod layout;
pub mod scanner;

pub use collect::{BasenameCollector, CascadingCollector, CollectionPlan, Collector};
pub use ignore::IgnoreRules;
pub use layout::CookbookLayout;
pub use scanner::{CookbookScanner, ScanOptions};
