//! The character record and the identifiers it references.
//!
//! [`Character`] is the single mutable root of the builder. The engine reads
//! it as an immutable snapshot during a resolution pass; the only mutations
//! defined here are explicit edit operations (feat list transformations and
//! condition toggles) that either succeed or return an
//! [`EditRejection`](crate::error::EditRejection) without touching state.
mod abilities;
mod character;
mod equipment;
mod feats;
mod ids;
mod skills;

pub use abilities::{Ability, AbilityScoreSet, ability_modifier};
pub use character::Character;
pub use equipment::{Armor, Equipment, Weapon, WeaponCategory};
pub use feats::{
    CharacterFeatInstance, FeatKey, add_feat, next_instance_id, remove_feat, sync_granted_feats,
};
pub use ids::{ClassId, ConditionKey, FeatId, InstanceId, InvalidConditionKey, RaceId, SkillId};
pub use skills::{CustomSynergy, Ranks, SkillInstance};
