//! Character record loader.

use std::path::Path;

use anyhow::Context;
use builder_core::Character;

use crate::loaders::{LoadResult, parse_ron};

/// Loader for character records stored as RON.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Character> {
        parse_ron(path, "character")
    }

    /// Write a character record as pretty RON.
    pub fn save(path: &Path, character: &Character) -> LoadResult<()> {
        let content = ron::ser::to_string_pretty(character, ron::ser::PrettyConfig::default())
            .context("Failed to serialize character")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write file {}", path.display()))
    }
}
