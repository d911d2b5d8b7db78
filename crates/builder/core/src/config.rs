/// Rules constants and tunable parameters of the derivation engine.
///
/// The defaults reproduce the standard rules variant. House rules override
/// individual fields from `rules.toml`; missing fields keep their default.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Feat slots every character has at creation.
    pub base_feat_slots: i32,
    /// A further feat slot is gained every this many character levels.
    pub feat_slot_interval: u32,
    /// Class skill rank cap is `level + class_skill_cap_bonus`.
    pub class_skill_cap_bonus: i32,
    /// First-level skill points are `per_level * first_level_skill_multiplier`.
    pub first_level_skill_multiplier: i32,
    /// Floor applied to per-level skill points after INT and racial bonuses.
    pub min_skill_points_per_level: i32,
    /// Skill points spent per rank of a cross-class skill.
    pub cross_class_rank_cost: i32,
    /// Ranks a skill needs before its synergy rules apply, unless the rule overrides it.
    pub synergy_threshold: u32,
    /// Synergy bonus granted when a rule does not declare its own.
    pub synergy_bonus: i32,
    /// Bonus per favored enemy selection and per later favored enemy slot.
    pub favored_enemy_bonus: i32,
}

impl RulesConfig {
    pub const DEFAULT_BASE_FEAT_SLOTS: i32 = 1;
    pub const DEFAULT_FEAT_SLOT_INTERVAL: u32 = 3;
    pub const DEFAULT_CLASS_SKILL_CAP_BONUS: i32 = 3;
    pub const DEFAULT_FIRST_LEVEL_SKILL_MULTIPLIER: i32 = 4;
    pub const DEFAULT_MIN_SKILL_POINTS_PER_LEVEL: i32 = 1;
    pub const DEFAULT_CROSS_CLASS_RANK_COST: i32 = 2;
    pub const DEFAULT_SYNERGY_THRESHOLD: u32 = 5;
    pub const DEFAULT_SYNERGY_BONUS: i32 = 2;
    pub const DEFAULT_FAVORED_ENEMY_BONUS: i32 = 2;

    /// Standard rules, usable in `static` position.
    pub const STANDARD: Self = Self::new();

    pub const fn new() -> Self {
        Self {
            base_feat_slots: Self::DEFAULT_BASE_FEAT_SLOTS,
            feat_slot_interval: Self::DEFAULT_FEAT_SLOT_INTERVAL,
            class_skill_cap_bonus: Self::DEFAULT_CLASS_SKILL_CAP_BONUS,
            first_level_skill_multiplier: Self::DEFAULT_FIRST_LEVEL_SKILL_MULTIPLIER,
            min_skill_points_per_level: Self::DEFAULT_MIN_SKILL_POINTS_PER_LEVEL,
            cross_class_rank_cost: Self::DEFAULT_CROSS_CLASS_RANK_COST,
            synergy_threshold: Self::DEFAULT_SYNERGY_THRESHOLD,
            synergy_bonus: Self::DEFAULT_SYNERGY_BONUS,
            favored_enemy_bonus: Self::DEFAULT_FAVORED_ENEMY_BONUS,
        }
    }

    /// Feat slots from level advancement alone (excluding the creation slot).
    pub fn periodic_feat_slots(&self, level: u32) -> i32 {
        if self.feat_slot_interval == 0 {
            return 0;
        }
        (level / self.feat_slot_interval) as i32
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
