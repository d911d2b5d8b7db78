//! Effects: declaration, toggling, aggregation and stacking.
//!
//! Definitions declare [`EffectDetail`]s. For a given character the
//! [`ToggleRegistry`] decides which conditional effects are on, [`aggregate`]
//! sorts every effect into typed buckets, and resolvers reduce the buckets
//! they consume through a [`BonusStack`].
mod aggregate;
mod detail;
mod favored;
mod source;
mod stacking;
mod toggle;

pub use aggregate::{AggregatedFeatEffects, EffectEntry, aggregate, stack_active};
pub use detail::{BonusType, EffectDetail, EffectTarget, EffectValue, SaveScope, WeaponScope};
pub use favored::{FavoredEnemy, FavoredEnemySummary};
pub use source::EffectSource;
pub use stacking::{BonusStack, Contribution, StackOutcome};
pub use toggle::{ToggleEntry, ToggleRegistry, ToggleSource, set_condition};
