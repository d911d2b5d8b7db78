//! Ability score resolution.
//!
//! Term order is fixed: base, racial, aging, size, applied effects, then the
//! temporary custom modifier.

use std::collections::BTreeMap;

use super::breakdown::{Anomaly, Breakdown, TermKind};
use crate::catalog::BuilderCatalog;
use crate::catalog::tables::SizeCategory;
use crate::effect::{AggregatedFeatEffects, BonusStack};
use crate::state::{Ability, Character, ability_modifier};

/// Resolved score of one ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AbilityBreakdown {
    pub ability: Ability,
    pub base: i32,
    pub score: i32,
    pub modifier: i32,
    pub breakdown: Breakdown,
}

/// All six resolved abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AbilityTable {
    abilities: BTreeMap<Ability, AbilityBreakdown>,
}

impl AbilityTable {
    pub fn get(&self, ability: Ability) -> Option<&AbilityBreakdown> {
        self.abilities.get(&ability)
    }

    /// Resolved score; 10 when the ability was not resolved.
    pub fn score(&self, ability: Ability) -> i32 {
        self.get(ability).map_or(10, |resolved| resolved.score)
    }

    /// Resolved modifier; 0 when the ability was not resolved.
    pub fn modifier(&self, ability: Ability) -> i32 {
        self.get(ability).map_or(0, |resolved| resolved.modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityBreakdown> {
        self.abilities.values()
    }
}

/// Natural size of the character's race and the size actually in effect.
pub(crate) fn sizes(character: &Character, catalog: &BuilderCatalog<'_>) -> (SizeCategory, SizeCategory) {
    let natural = catalog
        .race(&character.race)
        .map_or(SizeCategory::Medium, |race| race.size);
    (natural, character.size_override.unwrap_or(natural))
}

/// Resolves the six ability scores.
///
/// Ability effects must carry flat values; a symbolic value would make the
/// score depend on itself, so it contributes nothing and is flagged.
pub fn resolve_abilities(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
    effects: &AggregatedFeatEffects,
) -> AbilityTable {
    let race = catalog.lookup_race(&character.race);
    let (natural, size) = sizes(character, catalog);

    let abilities = Ability::ALL
        .into_iter()
        .map(|ability| {
            let base = character.base_abilities.get(ability);
            let mut breakdown = Breakdown::new();
            breakdown.push(TermKind::Base, "Base", base);

            if let Some(race) = race {
                breakdown.push(TermKind::Racial, race.label.as_str(), race.ability_modifier(ability));
            }
            breakdown.push(
                TermKind::Aging,
                format!("Age ({})", character.age),
                character.age.ability_adjustment(ability),
            );
            breakdown.push(
                TermKind::Size,
                format!("Size ({size})"),
                size.ability_adjustment(natural, ability),
            );

            let mut stack = BonusStack::new();
            for entry in &effects.ability_scores {
                if !entry.is_active || entry.scope != ability {
                    continue;
                }
                match entry.detail.value.flat() {
                    Some(value) => stack.add(entry.label(), value, entry.detail.bonus_type),
                    None => breakdown.flag(Anomaly::SymbolicAbilityEffect {
                        source_label: entry.label(),
                        ability,
                    }),
                }
            }
            breakdown.push_stack(stack.resolve());

            breakdown.push(
                TermKind::Custom,
                "Temporary modifier",
                character.custom_modifiers.get(ability),
            );

            let score = breakdown.total;
            let resolved = AbilityBreakdown {
                ability,
                base,
                score,
                modifier: ability_modifier(score),
                breakdown,
            };
            (ability, resolved)
        })
        .collect();

    AbilityTable { abilities }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tables::AgeCategory;
    use crate::effect::{EffectDetail, EffectTarget, aggregate};
    use crate::state::{AbilityScoreSet, ClassId, RaceId};
    use crate::test_support::{chosen, fixture_catalog, human_fighter};

    fn resolve(character: &Character, snapshot: &crate::catalog::CatalogSnapshot) -> AbilityTable {
        let catalog = snapshot.as_catalog();
        let effects = aggregate(character, &catalog);
        resolve_abilities(character, &catalog, &effects)
    }

    #[test]
    fn terms_follow_fixed_order() {
        let snapshot = fixture_catalog();
        let mut character = Character::new("Borin", RaceId::new("dwarf"), ClassId::new("fighter"), 1)
            .with_abilities(AbilityScoreSet::new(15, 12, 14, 10, 12, 10))
            .with_age(AgeCategory::MiddleAge);
        character.custom_modifiers.set(Ability::Constitution, 2);
        character.feats = vec![chosen(1, "great_stamina", None)];

        let table = resolve(&character, &snapshot);
        let con = table.get(Ability::Constitution).unwrap();
        let kinds: Vec<_> = con.breakdown.terms.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TermKind::Base,
                TermKind::Racial,
                TermKind::Aging,
                TermKind::Effect,
                TermKind::Custom
            ]
        );
        assert_eq!(con.score, 14 + 2 - 1 + 2 + 2);
        assert_eq!(con.modifier, 4);
    }

    #[test]
    fn score_minus_non_base_terms_is_base() {
        let snapshot = fixture_catalog();
        let mut character = Character::new("Pip", RaceId::new("halfling"), ClassId::new("rogue"), 3)
            .with_abilities(AbilityScoreSet::new(8, 17, 12, 13, 10, 14))
            .with_age(AgeCategory::Old);
        character.size_override = Some(SizeCategory::Medium);
        character.custom_modifiers.set(Ability::Dexterity, -4);

        let table = resolve(&character, &snapshot);
        for resolved in table.iter() {
            let non_base: i32 = resolved
                .breakdown
                .terms
                .iter()
                .filter(|t| t.kind != TermKind::Base)
                .map(|t| t.value)
                .sum();
            assert_eq!(resolved.score - non_base, resolved.base, "{}", resolved.ability);
        }
    }

    #[test]
    fn size_override_adjusts_relative_to_race() {
        let snapshot = fixture_catalog();
        let mut character = human_fighter(1);
        character.size_override = Some(SizeCategory::Large);

        let table = resolve(&character, &snapshot);
        let strength = table.get(Ability::Strength).unwrap();
        assert_eq!(strength.breakdown.sum_of(TermKind::Size), 8);
        assert_eq!(table.modifier(Ability::Strength), ability_modifier(strength.score));
    }

    #[test]
    fn modifier_floors_odd_scores() {
        let snapshot = fixture_catalog();
        let character = human_fighter(1).with_abilities(AbilityScoreSet::new(9, 11, 3, 10, 10, 10));
        let table = resolve(&character, &snapshot);
        assert_eq!(table.modifier(Ability::Strength), -1);
        assert_eq!(table.modifier(Ability::Dexterity), 0);
        assert_eq!(table.modifier(Ability::Constitution), -4);
    }

    #[test]
    fn symbolic_ability_effect_is_flagged() {
        let mut snapshot = fixture_catalog();
        let feat = crate::catalog::FeatDefinition::new("odd_gift", "Odd Gift").with_effect(
            EffectDetail::symbolic(EffectTarget::AbilityScore(Ability::Charisma), Ability::Wisdom),
        );
        snapshot.feats.push(feat);
        let mut character = human_fighter(1);
        character.feats = vec![chosen(1, "odd_gift", None)];

        let table = resolve(&character, &snapshot);
        let charisma = table.get(Ability::Charisma).unwrap();
        assert_eq!(charisma.score, character.base_abilities.get(Ability::Charisma));
        assert_eq!(
            charisma.breakdown.anomalies,
            vec![Anomaly::SymbolicAbilityEffect {
                source_label: "Odd Gift".into(),
                ability: Ability::Charisma,
            }]
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let snapshot = fixture_catalog();
        let character = human_fighter(6);
        assert_eq!(resolve(&character, &snapshot), resolve(&character, &snapshot));
    }
}
