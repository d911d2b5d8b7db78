use std::collections::BTreeMap;

use super::abilities::AbilityScoreSet;
use super::equipment::Equipment;
use super::feats::CharacterFeatInstance;
use super::ids::{ClassId, ConditionKey, InstanceId, RaceId, SkillId};
use super::skills::{CustomSynergy, Ranks, SkillInstance};
use crate::catalog::tables::{AgeCategory, SizeCategory};

/// The character record: the single mutable root of the builder.
///
/// Everything the engine reports is derived from this value and the catalog.
/// The engine never edits base values; the owning application re-runs
/// resolution after each user edit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    pub race: RaceId,
    pub class: ClassId,
    /// Character level as entered; out-of-range values are tolerated and
    /// clamped into `1..=Character::MAX_LEVEL` for computation.
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub age: AgeCategory,
    /// Size differing from the race's natural size (e.g. a house-ruled template).
    #[cfg_attr(feature = "serde", serde(default))]
    pub size_override: Option<SizeCategory>,
    pub base_abilities: AbilityScoreSet,
    /// User-entered temporary adjustments, applied last.
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_modifiers: AbilityScoreSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: BTreeMap<SkillId, SkillInstance>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_synergies: Vec<CustomSynergy>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub feats: Vec<CharacterFeatInstance>,
    /// Toggle state for conditional race and class effects, which have no
    /// feat instance to store it on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition_states: BTreeMap<ConditionKey, bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
}

impl Character {
    /// Highest level the engine computes with.
    pub const MAX_LEVEL: u32 = 1000;

    pub fn new(name: impl Into<String>, race: RaceId, class: ClassId, level: u32) -> Self {
        Self {
            name: name.into(),
            race,
            class,
            level,
            age: AgeCategory::default(),
            size_override: None,
            base_abilities: AbilityScoreSet::average(),
            custom_modifiers: AbilityScoreSet::default(),
            skills: BTreeMap::new(),
            custom_synergies: Vec::new(),
            feats: Vec::new(),
            condition_states: BTreeMap::new(),
            equipment: Equipment::default(),
        }
    }

    pub fn with_abilities(mut self, base_abilities: AbilityScoreSet) -> Self {
        self.base_abilities = base_abilities;
        self
    }

    pub fn with_age(mut self, age: AgeCategory) -> Self {
        self.age = age;
        self
    }

    /// Record ranks in a skill (builder pattern).
    pub fn with_skill(mut self, skill: impl Into<SkillId>, ranks: Ranks, is_class_skill: bool) -> Self {
        self.skills
            .insert(skill.into(), SkillInstance::new(ranks, is_class_skill));
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    /// Level used for computation: stored level clamped into `1..=MAX_LEVEL`.
    pub fn effective_level(&self) -> u32 {
        self.level.clamp(1, Self::MAX_LEVEL)
    }

    /// False when `effective_level` differs from the stored level.
    pub fn has_valid_level(&self) -> bool {
        (1..=Self::MAX_LEVEL).contains(&self.level)
    }

    /// Ranks recorded for a skill, zero when untouched.
    pub fn ranks(&self, skill: &SkillId) -> Ranks {
        self.skills.get(skill).map(|s| s.ranks).unwrap_or_default()
    }

    pub fn feat_instance(&self, id: InstanceId) -> Option<&CharacterFeatInstance> {
        self.feats.iter().find(|f| f.instance_id == id)
    }

    /// Feat instances the user picked (not granted by race or class).
    pub fn chosen_feats(&self) -> impl Iterator<Item = &CharacterFeatInstance> {
        self.feats.iter().filter(|f| !f.is_granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_level(level: u32) -> Character {
        Character::new("Test", RaceId::new("human"), ClassId::new("fighter"), level)
    }

    #[test]
    fn effective_level_is_clamped_into_range() {
        assert_eq!(at_level(0).effective_level(), 1);
        assert_eq!(at_level(7).effective_level(), 7);
        assert_eq!(at_level(3_000_000_000).effective_level(), Character::MAX_LEVEL);
        assert_eq!(at_level(u32::MAX).effective_level(), Character::MAX_LEVEL);
    }

    #[test]
    fn only_stored_levels_in_range_are_valid() {
        assert!(!at_level(0).has_valid_level());
        assert!(at_level(1).has_valid_level());
        assert!(at_level(Character::MAX_LEVEL).has_valid_level());
        assert!(!at_level(Character::MAX_LEVEL + 1).has_valid_level());
    }
}
