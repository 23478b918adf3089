//! Test utilities for Galley unit tests.
//!
//! Provides fixture builders that lay out search roots and cookbooks on a
//! real temporary filesystem, since the loader's behaviour is defined by
//! directory structure.

pub mod fixtures;

pub use fixtures::*;
