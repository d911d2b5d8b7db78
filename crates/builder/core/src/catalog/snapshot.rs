use std::collections::BTreeSet;

use super::{
    BuilderCatalog, Catalog, ClassDefinition, ClassOracle, FeatDefinition, FeatOracle,
    Prerequisite, RaceDefinition, RaceOracle, SkillDefinition, SkillOracle,
};
use crate::config::RulesConfig;
use crate::effect::{EffectDetail, EffectTarget};
use crate::state::{ClassId, ConditionKey, FeatId, RaceId, SkillId};

/// In-memory catalog holding every definition list plus the rules in use.
///
/// Implements all four oracles. Content loaders produce one of these; tests
/// build them directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CatalogSnapshot {
    pub races: Vec<RaceDefinition>,
    pub classes: Vec<ClassDefinition>,
    pub skills: Vec<SkillDefinition>,
    pub feats: Vec<FeatDefinition>,
    /// Condition keys effects are allowed to reference.
    pub condition_keys: Vec<ConditionKey>,
    pub rules: RulesConfig,
}

/// A consistency problem found by [`CatalogSnapshot::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogIssue {
    #[error("{kind} '{id}' is defined more than once")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{owner} references undeclared condition '{key}'")]
    UndeclaredCondition { owner: String, key: ConditionKey },

    #[error("{owner} references unknown feat '{feat}'")]
    UnknownFeat { owner: String, feat: FeatId },

    #[error("{owner} references unknown skill '{skill}'")]
    UnknownSkill { owner: String, skill: SkillId },
}

impl CatalogSnapshot {
    /// Borrow this snapshot as a fully populated catalog.
    pub fn as_catalog(&self) -> BuilderCatalog<'_> {
        Catalog::with_all(
            self as &dyn RaceOracle,
            self as &dyn ClassOracle,
            self as &dyn SkillOracle,
            self as &dyn FeatOracle,
            &self.rules,
        )
    }

    /// Cross-reference check over the whole snapshot.
    ///
    /// Returns every issue found, in catalog order. An empty list means all
    /// ids are unique and every reference resolves.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        duplicates("race", self.races.iter().map(|r| r.id.as_str()), &mut issues);
        duplicates("class", self.classes.iter().map(|c| c.id.as_str()), &mut issues);
        duplicates("skill", self.skills.iter().map(|s| s.id.as_str()), &mut issues);
        duplicates("feat", self.feats.iter().map(|f| f.id.as_str()), &mut issues);

        for race in &self.races {
            let owner = format!("race '{}'", race.id);
            self.check_effects(&owner, &race.effects, &mut issues);
            for granted in &race.granted_feats {
                self.check_feat(&owner, &granted.feat, &mut issues);
            }
            for (skill, _) in &race.skill_bonuses {
                self.check_skill(&owner, skill, &mut issues);
            }
        }

        for class in &self.classes {
            let owner = format!("class '{}'", class.id);
            self.check_effects(&owner, &class.effects, &mut issues);
            for granted in &class.granted_feats {
                self.check_feat(&owner, &granted.feat, &mut issues);
            }
            for skill in &class.class_skills {
                self.check_skill(&owner, skill, &mut issues);
            }
        }

        for skill in &self.skills {
            let owner = format!("skill '{}'", skill.id);
            for synergy in &skill.synergies {
                self.check_skill(&owner, &synergy.target, &mut issues);
            }
        }

        for feat in &self.feats {
            let owner = format!("feat '{}'", feat.id);
            self.check_effects(&owner, &feat.effects, &mut issues);
            for prerequisite in &feat.prerequisites {
                match prerequisite {
                    Prerequisite::Feat(required) => self.check_feat(&owner, required, &mut issues),
                    Prerequisite::SkillRanks { skill, .. } => {
                        self.check_skill(&owner, skill, &mut issues)
                    }
                    Prerequisite::BaseAttackBonus(_)
                    | Prerequisite::AbilityScore { .. }
                    | Prerequisite::CasterLevel(_)
                    | Prerequisite::CharacterLevel(_)
                    | Prerequisite::Special(_) => {}
                }
            }
        }

        issues
    }

    fn check_effects(&self, owner: &str, effects: &[EffectDetail], issues: &mut Vec<CatalogIssue>) {
        for effect in effects {
            if let Some(key) = &effect.condition
                && !self.condition_keys.contains(key)
            {
                issues.push(CatalogIssue::UndeclaredCondition {
                    owner: owner.to_string(),
                    key: key.clone(),
                });
            }
            if let EffectTarget::Skill(skill) = &effect.target {
                self.check_skill(owner, skill, issues);
            }
        }
    }

    fn check_feat(&self, owner: &str, feat: &FeatId, issues: &mut Vec<CatalogIssue>) {
        if FeatOracle::feat(self, feat).is_none() {
            issues.push(CatalogIssue::UnknownFeat {
                owner: owner.to_string(),
                feat: feat.clone(),
            });
        }
    }

    fn check_skill(&self, owner: &str, skill: &SkillId, issues: &mut Vec<CatalogIssue>) {
        if SkillOracle::skill(self, skill).is_none() {
            issues.push(CatalogIssue::UnknownSkill {
                owner: owner.to_string(),
                skill: skill.clone(),
            });
        }
    }
}

fn duplicates<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<CatalogIssue>,
) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(CatalogIssue::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

impl RaceOracle for CatalogSnapshot {
    fn race(&self, id: &RaceId) -> Option<&RaceDefinition> {
        self.races.iter().find(|race| &race.id == id)
    }
}

impl ClassOracle for CatalogSnapshot {
    fn class(&self, id: &ClassId) -> Option<&ClassDefinition> {
        self.classes.iter().find(|class| &class.id == id)
    }

    fn classes(&self) -> Vec<&ClassDefinition> {
        self.classes.iter().collect()
    }
}

impl SkillOracle for CatalogSnapshot {
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    fn skills(&self) -> Vec<&SkillDefinition> {
        self.skills.iter().collect()
    }
}

impl FeatOracle for CatalogSnapshot {
    fn feat(&self, id: &FeatId) -> Option<&FeatDefinition> {
        self.feats.iter().find(|feat| &feat.id == id)
    }

    fn feats(&self) -> Vec<&FeatDefinition> {
        self.feats.iter().collect()
    }

    fn is_known_condition(&self, key: &ConditionKey) -> bool {
        self.condition_keys.contains(key)
    }
}
