use super::feat::GrantedFeat;
use super::tables::{CasterProgression, Progression, SaveKind, SaveProgression};
use crate::effect::EffectDetail;
use crate::state::{ClassId, SkillId};

/// A class-specific pool of bonus feat slots (e.g. "Fighter bonus feats").
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusFeatPool {
    pub label: String,
    /// Feat category the pool is restricted to; `None` accepts any feat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    /// Class levels at which the pool gains a slot.
    pub levels: Vec<u32>,
}

impl BonusFeatPool {
    /// Slots in the pool at a given class level.
    pub fn count_at(&self, level: u32) -> u32 {
        self.levels.iter().filter(|&&l| l <= level).count() as u32
    }

    pub fn accepts(&self, category: Option<&str>) -> bool {
        match (&self.category, category) {
            (None, _) => true,
            (Some(required), Some(actual)) => required.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        }
    }
}

/// Class definition as supplied by the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub id: ClassId,
    pub label: String,
    pub hit_die: u32,
    /// Class base skill points per level, before INT and race.
    pub skill_points: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_attack: Progression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fortitude: SaveProgression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reflex: SaveProgression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub will: SaveProgression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caster: Option<CasterProgression>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub granted_feats: Vec<GrantedFeat>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_feat_pools: Vec<BonusFeatPool>,
    /// Class levels at which a favored enemy slot is gained.
    #[cfg_attr(feature = "serde", serde(default))]
    pub favored_enemy_levels: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectDetail>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<ClassId>, label: impl Into<String>, hit_die: u32, skill_points: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            hit_die,
            skill_points,
            base_attack: Progression::Poor,
            fortitude: SaveProgression::Poor,
            reflex: SaveProgression::Poor,
            will: SaveProgression::Poor,
            caster: None,
            class_skills: Vec::new(),
            granted_feats: Vec::new(),
            bonus_feat_pools: Vec::new(),
            favored_enemy_levels: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn save_progression(&self, save: SaveKind) -> SaveProgression {
        match save {
            SaveKind::Fortitude => self.fortitude,
            SaveKind::Reflex => self.reflex,
            SaveKind::Will => self.will,
        }
    }

    pub fn is_class_skill(&self, skill: &SkillId) -> bool {
        self.class_skills.contains(skill)
    }

    pub fn caster_level(&self, level: u32) -> u32 {
        self.caster.map_or(0, |c| c.caster_level(level))
    }

    pub fn favored_enemy_slots(&self, level: u32) -> u32 {
        self.favored_enemy_levels
            .iter()
            .filter(|&&l| l <= level)
            .count() as u32
    }
}
