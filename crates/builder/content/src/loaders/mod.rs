//! Content loaders for reading builder data from files.
//!
//! Every loader returns builder-core types. Parse errors carry the file path.

pub mod catalog;
pub mod character;
pub mod config;
pub mod factory;

pub use catalog::CatalogLoader;
pub use character::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Parse a RON document, naming the file on failure.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}
