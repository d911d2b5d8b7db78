//! Worn and wielded equipment that feeds armor class, attacks and skills.

/// Body armor or shield.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub label: String,
    /// Armor (or shield) bonus to AC, enhancement included.
    pub armor_bonus: i32,
    /// Cap on the DEX modifier added to AC while worn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_dex_bonus: Option<i32>,
    /// Penalty (zero or negative) applied to skills subject to armor check.
    #[cfg_attr(feature = "serde", serde(default))]
    pub check_penalty: i32,
}

impl Armor {
    pub fn new(label: impl Into<String>, armor_bonus: i32) -> Self {
        Self {
            label: label.into(),
            armor_bonus,
            max_dex_bonus: None,
            check_penalty: 0,
        }
    }

    pub fn with_max_dex_bonus(mut self, max_dex_bonus: i32) -> Self {
        self.max_dex_bonus = Some(max_dex_bonus);
        self
    }

    pub fn with_check_penalty(mut self, check_penalty: i32) -> Self {
        self.check_penalty = check_penalty;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeaponCategory {
    Melee,
    Ranged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    /// Weapon name; also matched against feat specializations.
    pub name: String,
    pub category: WeaponCategory,
    /// Finesse weapons use the better of STR and DEX to hit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub finesse: bool,
    /// Two-handed melee weapons add one and a half times STR to damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub two_handed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhancement: i32,
}

impl Weapon {
    pub fn melee(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: WeaponCategory::Melee,
            finesse: false,
            two_handed: false,
            enhancement: 0,
        }
    }

    pub fn ranged(name: impl Into<String>) -> Self {
        Self {
            category: WeaponCategory::Ranged,
            ..Self::melee(name)
        }
    }

    pub fn finesse(mut self) -> Self {
        self.finesse = true;
        self
    }

    pub fn two_handed(mut self) -> Self {
        self.two_handed = true;
        self
    }

    pub fn with_enhancement(mut self, enhancement: i32) -> Self {
        self.enhancement = enhancement;
        self
    }

    pub fn is_melee(&self) -> bool {
        self.category == WeaponCategory::Melee
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub armor: Option<Armor>,
    pub shield: Option<Armor>,
    pub weapons: Vec<Weapon>,
}

impl Equipment {
    /// Combined armor check penalty of armor and shield.
    pub fn check_penalty(&self) -> i32 {
        self.armor.iter().chain(self.shield.iter()).map(|a| a.check_penalty.min(0)).sum()
    }

    /// Tightest DEX cap among worn armor and shield.
    pub fn max_dex_bonus(&self) -> Option<i32> {
        self.armor
            .iter()
            .chain(self.shield.iter())
            .filter_map(|a| a.max_dex_bonus)
            .min()
    }
}
