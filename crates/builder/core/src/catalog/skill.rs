use super::tables::SizeCategory;
use crate::config::RulesConfig;
use crate::state::{Ability, SkillId};

/// "Ranks in this skill grant a bonus to `target`."
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynergyRule {
    pub target: SkillId,
    /// Ranks needed; falls back to [`RulesConfig::synergy_threshold`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub threshold: Option<u32>,
    /// Bonus granted; falls back to [`RulesConfig::synergy_bonus`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: Option<i32>,
}

impl SynergyRule {
    pub fn new(target: impl Into<SkillId>) -> Self {
        Self {
            target: target.into(),
            threshold: None,
            bonus: None,
        }
    }

    pub fn threshold(&self, rules: &RulesConfig) -> u32 {
        self.threshold.unwrap_or(rules.synergy_threshold)
    }

    pub fn bonus(&self, rules: &RulesConfig) -> i32 {
        self.bonus.unwrap_or(rules.synergy_bonus)
    }
}

/// Skill definition as supplied by the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub label: String,
    /// `None` for skills without a key ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key_ability: Option<Ability>,
    /// Synergies this skill grants to other skills.
    #[cfg_attr(feature = "serde", serde(default))]
    pub synergies: Vec<SynergyRule>,
    /// Size-specific bonuses (e.g. Hide for small creatures).
    #[cfg_attr(feature = "serde", serde(default))]
    pub size_modifiers: Vec<(SizeCategory, i32)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_check_penalty: bool,
}

impl SkillDefinition {
    pub fn new(id: impl Into<SkillId>, label: impl Into<String>, key_ability: Option<Ability>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            key_ability,
            synergies: Vec::new(),
            size_modifiers: Vec::new(),
            armor_check_penalty: false,
        }
    }

    pub fn size_modifier(&self, size: SizeCategory) -> i32 {
        self.size_modifiers
            .iter()
            .filter(|(s, _)| *s == size)
            .map(|(_, value)| value)
            .sum()
    }
}
