//! Content factory for building a catalog snapshot from a data directory.

use std::path::{Path, PathBuf};

use builder_core::{CatalogIssue, CatalogSnapshot, Character, RulesConfig};

use crate::loaders::{CatalogLoader, CharacterLoader, ConfigLoader, LoadResult};

/// Content factory that loads builder content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml        (optional)
/// ├── races.ron
/// ├── classes.ron
/// ├── skills.ron
/// ├── feats.ron
/// ├── conditions.ron
/// └── characters/
///     └── tam.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules from `rules.toml`, or the standard rules when absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("rules.toml"))
    }

    /// Load every catalog file into one snapshot.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        let snapshot = CatalogSnapshot {
            races: CatalogLoader::load_races(&self.data_dir.join("races.ron"))?,
            classes: CatalogLoader::load_classes(&self.data_dir.join("classes.ron"))?,
            skills: CatalogLoader::load_skills(&self.data_dir.join("skills.ron"))?,
            feats: CatalogLoader::load_feats(&self.data_dir.join("feats.ron"))?,
            condition_keys: CatalogLoader::load_conditions(&self.data_dir.join("conditions.ron"))?,
            rules: self.load_rules()?,
        };

        tracing::info!(
            races = snapshot.races.len(),
            classes = snapshot.classes.len(),
            skills = snapshot.skills.len(),
            feats = snapshot.feats.len(),
            "catalog loaded"
        );
        Ok(snapshot)
    }

    /// Load the catalog and report its consistency issues.
    ///
    /// Issues are logged as warnings; the snapshot is still usable since
    /// lookups degrade to "no effect".
    pub fn load_checked_catalog(&self) -> LoadResult<(CatalogSnapshot, Vec<CatalogIssue>)> {
        let snapshot = self.load_catalog()?;
        let issues = snapshot.validate();
        for issue in &issues {
            tracing::warn!(%issue, "catalog inconsistency");
        }
        Ok((snapshot, issues))
    }

    /// Load a character from `characters/{name}.ron`.
    pub fn load_character(&self, name: &str) -> LoadResult<Character> {
        let path = self.data_dir.join("characters").join(format!("{}.ron", name));
        CharacterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
