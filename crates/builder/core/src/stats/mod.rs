//! Derived statistics.
//!
//! Each resolver reads a character snapshot plus the aggregated effects and
//! returns totals together with the [`Breakdown`] that produced them.
//! [`CharacterSheet::resolve`] runs all of them in dependency order.
mod abilities;
mod breakdown;
mod combat;
mod feat_slots;
mod sheet;
mod skills;

pub use abilities::{AbilityBreakdown, AbilityTable, resolve_abilities};
pub use breakdown::{Anomaly, Breakdown, Term, TermKind};
pub use combat::{CombatStats, WeaponAttack, resolve_combat, weapon_scope_applies};
pub use feat_slots::{ClassBonusPool, FeatSlotReport, resolve_feat_slots};
pub use sheet::{CharacterSheet, FeatPrerequisites};
pub use skills::{SkillPointBudget, SkillResult, rank_cap, resolve_skills, skill_point_budget};
