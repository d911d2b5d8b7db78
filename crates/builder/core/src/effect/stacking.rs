//! Bonus stacking.
//!
//! Resolvers collect the active effects for one statistic into a
//! [`BonusStack`] and reduce it here:
//!
//! - penalties (negative values) always apply
//! - untyped, dodge and circumstance bonuses always apply
//! - for every other bonus type only the largest bonus applies; on a tie the
//!   first one collected wins
//!
//! Suppressed bonuses are kept in the outcome so breakdowns can show why a
//! bonus did not count.

use super::detail::BonusType;

/// A single resolved bonus waiting to be stacked.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contribution {
    pub label: String,
    pub value: i32,
    pub bonus_type: BonusType,
}

/// Bonuses for one statistic, in collection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    contributions: Vec<Contribution>,
}

/// Result of reducing a [`BonusStack`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackOutcome {
    /// Contributions that count, in collection order.
    pub applied: Vec<Contribution>,
    /// Typed bonuses overruled by a larger bonus of the same type.
    pub suppressed: Vec<Contribution>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl Into<String>, value: i32, bonus_type: BonusType) {
        self.contributions.push(Contribution {
            label: label.into(),
            value,
            bonus_type,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    /// Apply the stacking rules.
    pub fn resolve(self) -> StackOutcome {
        let winners: Vec<Option<usize>> = self
            .contributions
            .iter()
            .map(|contribution| {
                if contribution.value < 0 || contribution.bonus_type.stacks() {
                    return None;
                }
                self.contributions
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| {
                        other.bonus_type == contribution.bonus_type && other.value >= 0
                    })
                    // max_by_key returns the last maximum; reverse to keep the first
                    .rev()
                    .max_by_key(|(_, other)| other.value)
                    .map(|(index, _)| index)
            })
            .collect();

        let mut outcome = StackOutcome::default();
        for (index, contribution) in self.contributions.into_iter().enumerate() {
            match winners[index] {
                Some(winner) if winner != index => outcome.suppressed.push(contribution),
                _ => outcome.applied.push(contribution),
            }
        }
        outcome
    }
}

impl StackOutcome {
    pub fn total(&self) -> i32 {
        self.applied.iter().map(|c| c.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_and_dodge_bonuses_stack() {
        let mut stack = BonusStack::new();
        stack.add("Dodge", 1, BonusType::Dodge);
        stack.add("Mobility", 4, BonusType::Dodge);
        stack.add("Training", 2, BonusType::Untyped);

        let outcome = stack.resolve();
        assert_eq!(outcome.total(), 7);
        assert!(outcome.suppressed.is_empty());
    }

    #[test]
    fn same_typed_bonuses_keep_only_the_largest() {
        let mut stack = BonusStack::new();
        stack.add("Ring", 2, BonusType::Deflection);
        stack.add("Shield spell", 4, BonusType::Deflection);
        stack.add("Cloak", 4, BonusType::Deflection);
        stack.add("Blessing", 1, BonusType::Sacred);

        let outcome = stack.resolve();
        assert_eq!(outcome.total(), 5);
        let applied: Vec<_> = outcome.applied.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(applied, vec!["Shield spell", "Blessing"]);
        assert_eq!(outcome.suppressed.len(), 2);
    }

    #[test]
    fn penalties_always_apply() {
        let mut stack = BonusStack::new();
        stack.add("Insight", 3, BonusType::Insight);
        stack.add("Curse", -2, BonusType::Insight);
        stack.add("Fatigue", -1, BonusType::Insight);

        let outcome = stack.resolve();
        assert_eq!(outcome.total(), 0);
        assert_eq!(outcome.applied.len(), 3);
    }
}
