//! Traits describing read-only definition data.
//!
//! Oracles expose the race, class, skill and feat definitions an external
//! loader produced (already localized). The [`Catalog`] aggregate bundles
//! them with the [`RulesConfig`] so resolvers can reach everything they need
//! without coupling to a concrete storage. Each oracle is optional: a catalog
//! that is only partially loaded still resolves, with the missing parts
//! contributing nothing.
mod class;
mod error;
mod feat;
mod race;
mod skill;
mod snapshot;
pub mod tables;

pub use class::{BonusFeatPool, ClassDefinition};
pub use error::CatalogError;
pub use feat::{FeatDefinition, FeatFlags, GrantedFeat, Prerequisite};
pub use race::RaceDefinition;
pub use skill::{SkillDefinition, SynergyRule};
pub use snapshot::{CatalogIssue, CatalogSnapshot};

use crate::config::RulesConfig;
use crate::error::BuilderError;
use crate::state::{ClassId, ConditionKey, FeatId, RaceId, SkillId};

pub trait RaceOracle: Send + Sync {
    fn race(&self, id: &RaceId) -> Option<&RaceDefinition>;
}

pub trait ClassOracle: Send + Sync {
    fn class(&self, id: &ClassId) -> Option<&ClassDefinition>;

    /// All class definitions in catalog order.
    fn classes(&self) -> Vec<&ClassDefinition>;
}

pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition>;

    /// All skill definitions in catalog order.
    fn skills(&self) -> Vec<&SkillDefinition>;
}

pub trait FeatOracle: Send + Sync {
    fn feat(&self, id: &FeatId) -> Option<&FeatDefinition>;

    /// All feat definitions in catalog order.
    fn feats(&self) -> Vec<&FeatDefinition>;

    /// Condition keys the catalog declares.
    fn is_known_condition(&self, key: &ConditionKey) -> bool;
}

static STANDARD_RULES: RulesConfig = RulesConfig::STANDARD;

/// Aggregates the read-only oracles required by the resolvers.
pub struct Catalog<'a, R, C, S, F>
where
    R: RaceOracle + ?Sized,
    C: ClassOracle + ?Sized,
    S: SkillOracle + ?Sized,
    F: FeatOracle + ?Sized,
{
    races: Option<&'a R>,
    classes: Option<&'a C>,
    skills: Option<&'a S>,
    feats: Option<&'a F>,
    rules: &'a RulesConfig,
}

pub type BuilderCatalog<'a> = Catalog<
    'a,
    dyn RaceOracle + 'a,
    dyn ClassOracle + 'a,
    dyn SkillOracle + 'a,
    dyn FeatOracle + 'a,
>;

impl<R, C, S, F> Clone for Catalog<'_, R, C, S, F>
where
    R: RaceOracle + ?Sized,
    C: ClassOracle + ?Sized,
    S: SkillOracle + ?Sized,
    F: FeatOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, C, S, F> Copy for Catalog<'_, R, C, S, F>
where
    R: RaceOracle + ?Sized,
    C: ClassOracle + ?Sized,
    S: SkillOracle + ?Sized,
    F: FeatOracle + ?Sized,
{
}

impl<'a, R, C, S, F> Catalog<'a, R, C, S, F>
where
    R: RaceOracle + ?Sized,
    C: ClassOracle + ?Sized,
    S: SkillOracle + ?Sized,
    F: FeatOracle + ?Sized,
{
    pub fn new(
        races: Option<&'a R>,
        classes: Option<&'a C>,
        skills: Option<&'a S>,
        feats: Option<&'a F>,
        rules: &'a RulesConfig,
    ) -> Self {
        Self {
            races,
            classes,
            skills,
            feats,
            rules,
        }
    }

    pub fn with_all(
        races: &'a R,
        classes: &'a C,
        skills: &'a S,
        feats: &'a F,
        rules: &'a RulesConfig,
    ) -> Self {
        Self::new(Some(races), Some(classes), Some(skills), Some(feats), rules)
    }

    /// A catalog with no definitions and standard rules.
    pub fn empty() -> Self {
        Self::new(None, None, None, None, &STANDARD_RULES)
    }

    pub fn rules(&self) -> &'a RulesConfig {
        self.rules
    }

    /// Returns a race definition.
    ///
    /// # Errors
    ///
    /// `RacesNotAvailable` without a race oracle, `RaceNotFound` for unknown ids.
    pub fn race(&self, id: &RaceId) -> Result<&'a RaceDefinition, CatalogError> {
        let races = self.races.ok_or(CatalogError::RacesNotAvailable)?;
        races
            .race(id)
            .ok_or_else(|| CatalogError::RaceNotFound(id.clone()))
    }

    /// Returns a class definition.
    ///
    /// # Errors
    ///
    /// `ClassesNotAvailable` without a class oracle, `ClassNotFound` for unknown ids.
    pub fn class(&self, id: &ClassId) -> Result<&'a ClassDefinition, CatalogError> {
        let classes = self.classes.ok_or(CatalogError::ClassesNotAvailable)?;
        classes
            .class(id)
            .ok_or_else(|| CatalogError::ClassNotFound(id.clone()))
    }

    /// Returns a skill definition.
    ///
    /// # Errors
    ///
    /// `SkillsNotAvailable` without a skill oracle, `SkillNotFound` for unknown ids.
    pub fn skill(&self, id: &SkillId) -> Result<&'a SkillDefinition, CatalogError> {
        let skills = self.skills.ok_or(CatalogError::SkillsNotAvailable)?;
        skills
            .skill(id)
            .ok_or_else(|| CatalogError::SkillNotFound(id.clone()))
    }

    /// Returns a feat definition.
    ///
    /// # Errors
    ///
    /// `FeatsNotAvailable` without a feat oracle, `FeatNotFound` for unknown ids.
    pub fn feat(&self, id: &FeatId) -> Result<&'a FeatDefinition, CatalogError> {
        let feats = self.feats.ok_or(CatalogError::FeatsNotAvailable)?;
        feats
            .feat(id)
            .ok_or_else(|| CatalogError::FeatNotFound(id.clone()))
    }

    /// All classes, empty when the class oracle is missing.
    pub fn classes(&self) -> Vec<&'a ClassDefinition> {
        self.classes.map(|c| c.classes()).unwrap_or_default()
    }

    /// All skills, empty when the skill oracle is missing.
    pub fn skills(&self) -> Vec<&'a SkillDefinition> {
        self.skills.map(|s| s.skills()).unwrap_or_default()
    }

    /// All feats, empty when the feat oracle is missing.
    pub fn feats(&self) -> Vec<&'a FeatDefinition> {
        self.feats.map(|f| f.feats()).unwrap_or_default()
    }

    pub fn is_known_condition(&self, key: &ConditionKey) -> bool {
        self.feats.is_some_and(|f| f.is_known_condition(key))
    }

    /// Race lookup that logs and degrades to `None`.
    pub fn lookup_race(&self, id: &RaceId) -> Option<&'a RaceDefinition> {
        degrade(self.race(id))
    }

    /// Class lookup that logs and degrades to `None`.
    pub fn lookup_class(&self, id: &ClassId) -> Option<&'a ClassDefinition> {
        degrade(self.class(id))
    }

    /// Skill lookup that logs and degrades to `None`.
    pub fn lookup_skill(&self, id: &SkillId) -> Option<&'a SkillDefinition> {
        degrade(self.skill(id))
    }

    /// Feat lookup that logs and degrades to `None`.
    pub fn lookup_feat(&self, id: &FeatId) -> Option<&'a FeatDefinition> {
        degrade(self.feat(id))
    }

    /// Display label for a feat, the raw id when unknown.
    pub fn feat_label(&self, id: &FeatId) -> String {
        self.feat(id)
            .map_or_else(|_| id.to_string(), |feat| feat.label.clone())
    }

    /// Display label for a skill, the raw id when unknown.
    pub fn skill_label(&self, id: &SkillId) -> String {
        self.skill(id)
            .map_or_else(|_| id.to_string(), |skill| skill.label.clone())
    }

    /// Display label for a class, the raw id when unknown.
    pub fn class_label(&self, id: &ClassId) -> String {
        self.class(id)
            .map_or_else(|_| id.to_string(), |class| class.label.clone())
    }

    /// Display label for a race, the raw id when unknown.
    pub fn race_label(&self, id: &RaceId) -> String {
        self.race(id)
            .map_or_else(|_| id.to_string(), |race| race.label.clone())
    }
}

impl<'a, R, C, S, F> Catalog<'a, R, C, S, F>
where
    R: RaceOracle + 'a,
    C: ClassOracle + 'a,
    S: SkillOracle + 'a,
    F: FeatOracle + 'a,
{
    /// Converts this catalog into the trait-object based `BuilderCatalog`.
    pub fn as_builder_catalog(&self) -> BuilderCatalog<'a> {
        let races: Option<&'a dyn RaceOracle> = self.races.map(|races| races as _);
        let classes: Option<&'a dyn ClassOracle> = self.classes.map(|classes| classes as _);
        let skills: Option<&'a dyn SkillOracle> = self.skills.map(|skills| skills as _);
        let feats: Option<&'a dyn FeatOracle> = self.feats.map(|feats| feats as _);
        Catalog::new(races, classes, skills, feats, self.rules)
    }
}

fn degrade<T>(result: Result<T, CatalogError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(
                code = error.error_code(),
                %error,
                "catalog lookup failed; reference contributes nothing"
            );
            None
        }
    }
}
