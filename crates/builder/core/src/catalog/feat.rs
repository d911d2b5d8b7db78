use bitflags::bitflags;

use crate::effect::EffectDetail;
use crate::state::{Ability, FeatId, SkillId};

bitflags! {
    /// Behavior switches of a feat definition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FeatFlags: u8 {
        /// May be taken more than once.
        const MULTIPLE         = 1 << 0;
        /// Each instance names a detail (weapon, skill, school...).
        const SPECIALIZED      = 1 << 1;
        /// Granted by a class rather than picked from the general list.
        const CLASS_FEATURE    = 1 << 2;
        /// Conditional effects are always on and cannot be toggled.
        const PERMANENT_EFFECT = 1 << 3;
        /// Each instance selects one favored enemy (specialization = enemy).
        const FAVORED_ENEMY    = 1 << 4;
    }
}

/// One prerequisite clause of a feat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Prerequisite {
    BaseAttackBonus(i32),
    AbilityScore { ability: Ability, minimum: i32 },
    SkillRanks { skill: SkillId, ranks: u32 },
    Feat(FeatId),
    CasterLevel(u32),
    CharacterLevel(u32),
    /// Free text, matched against a small set of known phrasings.
    Special(String),
}

/// A feat handed out by a race or class once a level is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantedFeat {
    pub feat: FeatId,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub specialization: Option<String>,
}

#[cfg(feature = "serde")]
fn first_level() -> u32 {
    1
}

impl GrantedFeat {
    pub fn at_level(feat: impl Into<FeatId>, level: u32) -> Self {
        Self {
            feat: feat.into(),
            level,
            specialization: None,
        }
    }
}

/// Feat definition as supplied by the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatDefinition {
    pub id: FeatId,
    pub label: String,
    /// Category used by restricted bonus feat pools (e.g. "fighter").
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Vec<Prerequisite>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectDetail>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: FeatFlags,
}

impl FeatDefinition {
    pub fn new(id: impl Into<FeatId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: None,
            prerequisites: Vec::new(),
            effects: Vec::new(),
            flags: FeatFlags::empty(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    pub fn with_effect(mut self, effect: EffectDetail) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_flags(mut self, flags: FeatFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn can_take_multiple_times(&self) -> bool {
        self.flags.contains(FeatFlags::MULTIPLE)
    }

    pub fn requires_specialization(&self) -> bool {
        self.flags.contains(FeatFlags::SPECIALIZED)
    }

    pub fn is_class_feature(&self) -> bool {
        self.flags.contains(FeatFlags::CLASS_FEATURE)
    }

    pub fn has_permanent_effect(&self) -> bool {
        self.flags.contains(FeatFlags::PERMANENT_EFFECT)
    }

    pub fn is_favored_enemy(&self) -> bool {
        self.flags.contains(FeatFlags::FAVORED_ENEMY)
    }
}
