//! Catalog loaders: races, classes, skills, feats and condition keys.

use std::path::Path;

use builder_core::{ClassDefinition, ConditionKey, FeatDefinition, RaceDefinition, SkillDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// `races.ron`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceCatalog {
    pub races: Vec<RaceDefinition>,
}

/// `classes.ron`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// `skills.ron`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// `feats.ron`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatCatalog {
    pub feats: Vec<FeatDefinition>,
}

/// `conditions.ron`: the condition keys effects may reference.
///
/// Keys are validated while parsing, so a malformed key fails the load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionCatalog {
    pub conditions: Vec<ConditionKey>,
}

/// Loader for the RON catalog files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load_races(path: &Path) -> LoadResult<Vec<RaceDefinition>> {
        let catalog: RaceCatalog = parse_ron(path, "race catalog")?;
        Ok(catalog.races)
    }

    pub fn load_classes(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let catalog: ClassCatalog = parse_ron(path, "class catalog")?;
        Ok(catalog.classes)
    }

    pub fn load_skills(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = parse_ron(path, "skill catalog")?;
        Ok(catalog.skills)
    }

    pub fn load_feats(path: &Path) -> LoadResult<Vec<FeatDefinition>> {
        let catalog: FeatCatalog = parse_ron(path, "feat catalog")?;
        Ok(catalog.feats)
    }

    pub fn load_conditions(path: &Path) -> LoadResult<Vec<ConditionKey>> {
        let catalog: ConditionCatalog = parse_ron(path, "condition catalog")?;
        Ok(catalog.conditions)
    }
}
