//! Effect records carried by race, class and feat definitions.
//!
//! An [`EffectDetail`] is a tagged variant: [`EffectTarget`] says which
//! statistic it modifies (with any scope restriction as payload), the shared
//! fields say by how much, under which condition and with which bonus type.

use crate::catalog::tables::SaveKind;
use crate::state::{Ability, ConditionKey, SkillId};

/// Magnitude of an effect.
///
/// Either a number or one of the closed set of symbolic tokens. Symbolic
/// values are resolved by the consumer once ability modifiers are known.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectValue {
    Flat(i32),
    /// "Use that ability's modifier" (e.g. WIS to AC).
    AbilityModifier(Ability),
}

impl EffectValue {
    /// Resolve against the character's ability modifiers.
    pub fn resolve(&self, modifier_of: impl Fn(Ability) -> i32) -> i32 {
        match self {
            EffectValue::Flat(value) => *value,
            EffectValue::AbilityModifier(ability) => modifier_of(*ability),
        }
    }

    /// The number, when not symbolic.
    pub fn flat(&self) -> Option<i32> {
        match self {
            EffectValue::Flat(value) => Some(*value),
            EffectValue::AbilityModifier(_) => None,
        }
    }
}

/// Which saving throws an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SaveScope {
    All,
    Only(SaveKind),
}

impl SaveScope {
    pub fn applies_to(self, save: SaveKind) -> bool {
        match self {
            SaveScope::All => true,
            SaveScope::Only(kind) => kind == save,
        }
    }
}

/// Which attacks an attack or damage effect applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeaponScope {
    All,
    Melee,
    Ranged,
    /// A named weapon.
    Weapon(String),
    /// The weapon named by the owning feat instance's specialization.
    Specialization,
}

/// The statistic an effect modifies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectTarget {
    AbilityScore(Ability),
    SavingThrow(SaveScope),
    AttackRoll(WeaponScope),
    DamageRoll(WeaponScope),
    ArmorClass,
    /// Flat hit points, or hit points per character level.
    HitPoints { per_level: bool },
    Initiative,
    Speed,
    Skill(SkillId),
}

/// Bonus type, which decides stacking.
///
/// Untyped, dodge and circumstance bonuses stack; for every other type only
/// the largest bonus applies. Penalties always stack.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BonusType {
    #[default]
    Untyped,
    Dodge,
    Circumstance,
    Competence,
    Enhancement,
    Insight,
    Luck,
    Morale,
    Racial,
    Sacred,
    Profane,
    Size,
    Armor,
    Shield,
    NaturalArmor,
    Deflection,
}

impl BonusType {
    pub const fn stacks(self) -> bool {
        matches!(
            self,
            BonusType::Untyped | BonusType::Dodge | BonusType::Circumstance
        )
    }
}

/// One modifier declared by a definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDetail {
    pub target: EffectTarget,
    pub value: EffectValue,
    /// Toggle key; `None` means always active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<ConditionKey>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_type: BonusType,
}

impl EffectDetail {
    pub fn flat(target: EffectTarget, value: i32) -> Self {
        Self {
            target,
            value: EffectValue::Flat(value),
            condition: None,
            bonus_type: BonusType::Untyped,
        }
    }

    pub fn symbolic(target: EffectTarget, ability: Ability) -> Self {
        Self {
            target,
            value: EffectValue::AbilityModifier(ability),
            condition: None,
            bonus_type: BonusType::Untyped,
        }
    }

    pub fn when(mut self, condition: ConditionKey) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn typed(mut self, bonus_type: BonusType) -> Self {
        self.bonus_type = bonus_type;
        self
    }
}
