//! Traceable breakdowns of derived numbers.

use std::fmt;

use crate::effect::{Contribution, StackOutcome};
use crate::state::{Ability, Ranks, SkillId};

/// Category of a breakdown line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TermKind {
    Base,
    Racial,
    Aging,
    Size,
    /// One applied effect from race, class or feat.
    Effect,
    /// User temporary adjustment.
    Custom,
    Ranks,
    /// Key ability modifier.
    Ability,
    Synergy,
    Misc,
    ArmorCheck,
    BaseAttack,
    /// Class-provided amount (save base, skill points, bonus feats).
    Class,
    Equipment,
    HitDice,
    /// Rules floor or cap bringing the total to a valid value.
    Adjustment,
}

/// One named contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Term {
    pub kind: TermKind,
    pub label: String,
    pub value: i32,
}

/// Malformed snapshot data found while resolving.
///
/// Computation continues with the nearest valid value; the flag travels with
/// the breakdown so the UI can point at the bad input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Anomaly {
    #[error("skill '{skill}' has negative ranks ({ranks}); counted as 0")]
    NegativeRanks { skill: SkillId, ranks: Ranks },

    #[error("skill '{skill}' has {ranks} ranks; counted as {used}")]
    ExcessiveRanks {
        skill: SkillId,
        ranks: Ranks,
        used: Ranks,
    },

    #[error("{source_label} modifies {ability} with a symbolic value; ignored")]
    SymbolicAbilityEffect { source_label: String, ability: Ability },

    #[error("character level {stored} is out of range; treated as {used}")]
    InvalidLevel { stored: u32, used: u32 },
}

/// Ordered contributions plus their total.
///
/// `total` is always the sum of `terms`. Zero-valued terms are not recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Breakdown {
    pub terms: Vec<Term>,
    pub total: i32,
    /// Typed bonuses that lost to a larger bonus of the same type.
    pub suppressed: Vec<Contribution>,
    pub anomalies: Vec<Anomaly>,
}

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a term; zero values add no line.
    pub fn push(&mut self, kind: TermKind, label: impl Into<String>, value: i32) {
        if value == 0 {
            return;
        }
        self.total = self.total.saturating_add(value);
        self.terms.push(Term {
            kind,
            label: label.into(),
            value,
        });
    }

    /// Record every applied contribution of a stack as an effect line.
    pub fn push_stack(&mut self, outcome: StackOutcome) {
        for contribution in outcome.applied {
            self.push(TermKind::Effect, contribution.label, contribution.value);
        }
        self.suppressed.extend(outcome.suppressed);
    }

    pub fn flag(&mut self, anomaly: Anomaly) {
        tracing::warn!(%anomaly, "invalid character data");
        self.anomalies.push(anomaly);
    }

    /// Sum of the terms of one kind.
    pub fn sum_of(&self, kind: TermKind) -> i32 {
        self.terms
            .iter()
            .filter(|term| term.kind == kind)
            .fold(0, |sum, term| sum.saturating_add(term.value))
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            writeln!(f, "  {:<28} {:+}", term.label, term.value)?;
        }
        for contribution in &self.suppressed {
            writeln!(
                f,
                "  {:<28} ({:+} {}, not stacking)",
                contribution.label, contribution.value, contribution.bonus_type
            )?;
        }
        for anomaly in &self.anomalies {
            writeln!(f, "  ! {anomaly}")?;
        }
        write!(f, "  {:<28} {}", "= total", self.total)
    }
}
