//! Rules tables: size, age and class progressions.
//!
//! These are the fixed lookup tables of the rules variant. Catalog data picks
//! an entry (a race's size, a class's save progression); the numbers behind
//! each entry live here.

use crate::state::Ability;

/// Creature size category, smallest to largest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SizeCategory {
    Fine,
    Diminutive,
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
    Colossal,
}

impl SizeCategory {
    /// Size modifier to attack rolls and armor class.
    pub const fn attack_and_ac_modifier(self) -> i32 {
        match self {
            SizeCategory::Fine => 8,
            SizeCategory::Diminutive => 4,
            SizeCategory::Tiny => 2,
            SizeCategory::Small => 1,
            SizeCategory::Medium => 0,
            SizeCategory::Large => -1,
            SizeCategory::Huge => -2,
            SizeCategory::Gargantuan => -4,
            SizeCategory::Colossal => -8,
        }
    }

    /// Cumulative (STR, DEX, CON) adjustment from Fine up to this size.
    const fn cumulative_physical(self) -> (i32, i32, i32) {
        match self {
            SizeCategory::Fine => (0, 0, 0),
            SizeCategory::Diminutive => (0, -2, 0),
            SizeCategory::Tiny => (2, -4, 0),
            SizeCategory::Small => (6, -6, 0),
            SizeCategory::Medium => (10, -8, 2),
            SizeCategory::Large => (18, -10, 6),
            SizeCategory::Huge => (26, -12, 10),
            SizeCategory::Gargantuan => (34, -12, 14),
            SizeCategory::Colossal => (42, -12, 16),
        }
    }

    /// Ability adjustment for a creature of `natural` size that is `self` sized.
    ///
    /// Zero when the sizes match; racial modifiers already account for a
    /// race's natural size.
    pub const fn ability_adjustment(self, natural: SizeCategory, ability: Ability) -> i32 {
        let (to_str, to_dex, to_con) = self.cumulative_physical();
        let (from_str, from_dex, from_con) = natural.cumulative_physical();
        match ability {
            Ability::Strength => to_str - from_str,
            Ability::Dexterity => to_dex - from_dex,
            Ability::Constitution => to_con - from_con,
            Ability::Intelligence | Ability::Wisdom | Ability::Charisma => 0,
        }
    }
}

/// Aging category of a character.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AgeCategory {
    #[default]
    Adult,
    MiddleAge,
    Old,
    Venerable,
}

impl AgeCategory {
    /// Cumulative aging adjustment: physical abilities fall, mental ones rise.
    pub const fn ability_adjustment(self, ability: Ability) -> i32 {
        let (physical, mental) = match self {
            AgeCategory::Adult => (0, 0),
            AgeCategory::MiddleAge => (-1, 1),
            AgeCategory::Old => (-3, 2),
            AgeCategory::Venerable => (-6, 3),
        };
        if ability.is_physical() { physical } else { mental }
    }
}

/// Base attack bonus progression of a class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Progression {
    Good,
    Average,
    #[default]
    Poor,
}

impl Progression {
    pub const fn base_attack(self, level: u32) -> i32 {
        let level = level as i32;
        match self {
            Progression::Good => level,
            Progression::Average => level * 3 / 4,
            Progression::Poor => level / 2,
        }
    }
}

/// Saving throw progression of a class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SaveProgression {
    Good,
    #[default]
    Poor,
}

impl SaveProgression {
    pub const fn base_save(self, level: u32) -> i32 {
        let level = level as i32;
        match self {
            SaveProgression::Good => 2 + level / 2,
            SaveProgression::Poor => level / 3,
        }
    }
}

/// How a class's levels translate into caster level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CasterProgression {
    /// Caster level equals class level.
    Full,
    /// Half class level, starting at class level 4.
    Half,
}

impl CasterProgression {
    pub const fn caster_level(self, level: u32) -> u32 {
        match self {
            CasterProgression::Full => level,
            CasterProgression::Half if level >= 4 => level / 2,
            CasterProgression::Half => 0,
        }
    }
}

/// The three saving throws.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SaveKind {
    Fortitude,
    Reflex,
    Will,
}

impl SaveKind {
    pub const ALL: [SaveKind; 3] = [SaveKind::Fortitude, SaveKind::Reflex, SaveKind::Will];

    pub const fn key_ability(self) -> Ability {
        match self {
            SaveKind::Fortitude => Ability::Constitution,
            SaveKind::Reflex => Ability::Dexterity,
            SaveKind::Will => Ability::Wisdom,
        }
    }
}
