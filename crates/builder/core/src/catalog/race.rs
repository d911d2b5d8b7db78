use super::feat::GrantedFeat;
use super::tables::SizeCategory;
use crate::effect::EffectDetail;
use crate::state::{Ability, RaceId, SkillId};

/// Race definition as supplied by the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceDefinition {
    pub id: RaceId,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: SizeCategory,
    /// Base land speed in feet.
    pub base_speed: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability_modifiers: Vec<(Ability, i32)>,
    /// Extra feat slots at creation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_feat_slots: u32,
    /// Extra skill points per level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_skill_points: i32,
    /// Racial bonuses to specific skills.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_bonuses: Vec<(SkillId, i32)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub granted_feats: Vec<GrantedFeat>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectDetail>,
}

impl RaceDefinition {
    pub fn new(id: impl Into<RaceId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            size: SizeCategory::Medium,
            base_speed: 30,
            ability_modifiers: Vec::new(),
            bonus_feat_slots: 0,
            bonus_skill_points: 0,
            skill_bonuses: Vec::new(),
            granted_feats: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Summed racial modifier for one ability.
    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.ability_modifiers
            .iter()
            .filter(|(a, _)| *a == ability)
            .map(|(_, value)| value)
            .sum()
    }

    /// Summed racial bonus for one skill.
    pub fn skill_bonus(&self, skill: &SkillId) -> i32 {
        self.skill_bonuses
            .iter()
            .filter(|(s, _)| s == skill)
            .map(|(_, value)| value)
            .sum()
    }
}
