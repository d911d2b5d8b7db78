//! Data-driven catalog content and loaders.
//!
//! This crate reads the builder's data files:
//! - Race, class, skill and feat catalogs (RON)
//! - Declared condition keys (RON)
//! - Rules configuration (TOML)
//! - Character records (RON)
//!
//! Loaders deserialize straight into builder-core types. The engine itself
//! never touches the filesystem; everything here exists for tooling and tests.
//! A sample catalog lives in this crate's `data/` directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, CharacterLoader, ConfigLoader, ContentFactory, LoadResult};
