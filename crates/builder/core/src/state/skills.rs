use std::fmt;

use super::ids::SkillId;

/// Skill ranks at half-rank granularity.
///
/// Cross-class skills are bought in half ranks, so ranks are stored as a
/// count of halves. The raw value is kept exactly as entered: negative,
/// over-cap or absurdly large ranks are representable and flagged by the
/// skill resolver instead of being silently corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ranks {
    halves: i32,
}

impl Ranks {
    pub const ZERO: Self = Self { halves: 0 };

    /// Largest value used for computation; anything above is clamped to it.
    pub const MAX: Self = Self { halves: 20_000 };

    /// Whole ranks (e.g. `Ranks::whole(4)` is four ranks).
    pub const fn whole(ranks: i32) -> Self {
        Self {
            halves: ranks.saturating_mul(2),
        }
    }

    pub const fn from_halves(halves: i32) -> Self {
        Self { halves }
    }

    pub const fn halves(self) -> i32 {
        self.halves
    }

    /// Ranks that count toward a skill total (half ranks round down).
    pub const fn whole_part(self) -> i32 {
        self.halves.div_euclid(2)
    }

    pub const fn is_negative(self) -> bool {
        self.halves < 0
    }

    pub const fn is_excessive(self) -> bool {
        self.halves > Self::MAX.halves
    }

    /// Nearest valid value for computation, within `ZERO..=MAX`.
    pub const fn clamped(self) -> Self {
        if self.halves < 0 {
            Self::ZERO
        } else if self.is_excessive() {
            Self::MAX
        } else {
            self
        }
    }

    /// True when these ranks meet a whole-rank threshold.
    pub const fn meets(self, threshold: u32) -> bool {
        self.halves as i64 >= threshold as i64 * 2
    }
}

impl fmt::Display for Ranks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.halves % 2 == 0 {
            write!(f, "{}", self.halves / 2)
        } else {
            write!(f, "{}.5", self.halves.div_euclid(2))
        }
    }
}

// Character files write ranks as plain numbers (`4`, `2.5`).
#[cfg(feature = "serde")]
impl serde::Serialize for Ranks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(f64::from(self.halves) / 2.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ranks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <f64 as serde::Deserialize>::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("skill ranks must be a finite number"));
        }
        Ok(Self::from_halves((value * 2.0).floor() as i32))
    }
}

/// One skill as recorded on a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillInstance {
    pub ranks: Ranks,
    pub is_class_skill: bool,
    pub misc_modifier: i32,
}

impl SkillInstance {
    pub fn new(ranks: Ranks, is_class_skill: bool) -> Self {
        Self {
            ranks,
            is_class_skill,
            misc_modifier: 0,
        }
    }

    pub fn with_misc_modifier(mut self, misc_modifier: i32) -> Self {
        self.misc_modifier = misc_modifier;
        self
    }
}

/// A synergy rule authored on the character rather than the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomSynergy {
    /// Skill whose ranks unlock the bonus.
    pub from: SkillId,
    /// Skill that receives the bonus.
    pub to: SkillId,
    pub threshold: u32,
    pub bonus: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_ranks_round_down_in_totals() {
        let ranks = Ranks::from_halves(5);
        assert_eq!(ranks.whole_part(), 2);
        assert_eq!(ranks.to_string(), "2.5");
        assert_eq!(Ranks::whole(4).to_string(), "4");
    }

    #[test]
    fn negative_ranks_clamp_to_zero() {
        let ranks = Ranks::whole(-2);
        assert!(ranks.is_negative());
        assert_eq!(ranks.clamped(), Ranks::ZERO);
        assert_eq!(ranks.whole_part(), -2);
    }

    #[test]
    fn thresholds_compare_whole_ranks() {
        assert!(Ranks::whole(5).meets(5));
        assert!(!Ranks::from_halves(9).meets(5));
        assert!(Ranks::ZERO.meets(0));
        assert!(!Ranks::from_halves(i32::MAX).meets(u32::MAX));
    }

    #[test]
    fn huge_ranks_saturate_and_clamp_to_max() {
        assert_eq!(Ranks::whole(i32::MAX).halves(), i32::MAX);
        assert_eq!(Ranks::whole(i32::MIN).halves(), i32::MIN);

        let ranks = Ranks::from_halves(i32::MAX);
        assert!(ranks.is_excessive());
        assert_eq!(ranks.clamped(), Ranks::MAX);
        assert!(!Ranks::MAX.is_excessive());
    }
}
