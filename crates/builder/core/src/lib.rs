//! Deterministic character derivation rules shared by every builder surface.
//!
//! `builder-core` evaluates feat prerequisites, aggregates modifiers from
//! race, class, age, size, equipment and feats, and resolves every derived
//! statistic together with the ordered list of contributions behind it.
//! Every resolver is a pure function of a [`Character`] snapshot and a
//! [`BuilderCatalog`]; nothing here performs I/O or keeps hidden state.
pub mod catalog;
pub mod config;
pub mod effect;
pub mod error;
pub mod prereq;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{
    BonusFeatPool, BuilderCatalog, Catalog, CatalogError, CatalogIssue, CatalogSnapshot,
    ClassDefinition, ClassOracle, FeatDefinition, FeatFlags, FeatOracle, GrantedFeat,
    Prerequisite, RaceDefinition, RaceOracle, SkillDefinition, SkillOracle, SynergyRule,
};
pub use catalog::tables::{
    AgeCategory, CasterProgression, Progression, SaveKind, SaveProgression, SizeCategory,
};
pub use config::RulesConfig;
pub use effect::{
    AggregatedFeatEffects, BonusStack, BonusType, Contribution, EffectDetail, EffectEntry,
    EffectSource, EffectTarget, EffectValue, FavoredEnemy, FavoredEnemySummary, SaveScope,
    StackOutcome, ToggleEntry, ToggleRegistry, ToggleSource, WeaponScope, aggregate,
    set_condition,
};
pub use error::{BuilderError, EditRejection, ErrorSeverity};
pub use prereq::{PrerequisiteContext, PrerequisiteMessage, evaluate, meets_prerequisites};
pub use state::{
    Ability, AbilityScoreSet, Armor, Character, CharacterFeatInstance, ClassId, ConditionKey,
    CustomSynergy, Equipment, FeatId, FeatKey, InstanceId, InvalidConditionKey, RaceId, Ranks,
    SkillId, SkillInstance, Weapon, WeaponCategory, ability_modifier, add_feat,
    next_instance_id, remove_feat, sync_granted_feats,
};
pub use stats::{
    AbilityBreakdown, AbilityTable, Anomaly, Breakdown, CharacterSheet, ClassBonusPool,
    CombatStats, FeatPrerequisites, FeatSlotReport, SkillPointBudget, SkillResult, Term,
    TermKind, WeaponAttack,
};
