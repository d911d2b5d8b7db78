//! Rules configuration loader.

use std::path::Path;

use builder_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file.
    ///
    /// Fields missing from the file keep their standard values.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        let config: RulesConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML at {}: {}", path.display(), e))?;

        Ok(config)
    }

    /// Like [`ConfigLoader::load`], but a missing file yields the standard rules.
    pub fn load_or_default(path: &Path) -> LoadResult<RulesConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rules file; using standard rules");
            return Ok(RulesConfig::default());
        }
        Self::load(path)
    }
}
