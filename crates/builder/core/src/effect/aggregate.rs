//! Effect aggregation.
//!
//! Collects every effect declared by the character's race, class and feat
//! instances into one typed bucket per effect kind. Nothing is summed here:
//! callers filter by scope, resolve symbolic values against resolved ability
//! modifiers and reduce through a [`BonusStack`].

use super::detail::{EffectDetail, EffectTarget, SaveScope, WeaponScope};
use super::favored::FavoredEnemySummary;
use super::source::EffectSource;
use super::stacking::BonusStack;
use super::toggle::ToggleRegistry;
use crate::catalog::BuilderCatalog;
use crate::state::{Ability, Character, SkillId};

/// One effect in an aggregated bucket.
///
/// `scope` is the payload of the effect's target (the ability, the save
/// scope, the weapon scope...), lifted out so consumers can filter without
/// matching on the target again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EffectEntry<T> {
    pub source: EffectSource,
    /// `false` for conditional effects whose toggle is off.
    pub is_active: bool,
    pub scope: T,
    pub detail: EffectDetail,
}

impl<T> EffectEntry<T> {
    pub fn label(&self) -> String {
        self.source.label()
    }
}

/// Typed effect collections of one character.
///
/// Recomputed from the character on every read and never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AggregatedFeatEffects {
    pub ability_scores: Vec<EffectEntry<Ability>>,
    pub saving_throws: Vec<EffectEntry<SaveScope>>,
    pub attack_rolls: Vec<EffectEntry<WeaponScope>>,
    pub damage_rolls: Vec<EffectEntry<WeaponScope>>,
    pub armor_class: Vec<EffectEntry<()>>,
    /// Scope is `per_level`.
    pub hit_points: Vec<EffectEntry<bool>>,
    pub initiative: Vec<EffectEntry<()>>,
    pub speed: Vec<EffectEntry<()>>,
    pub skills: Vec<EffectEntry<SkillId>>,
    pub favored_enemies: FavoredEnemySummary,
    pub toggles: ToggleRegistry,
}

impl AggregatedFeatEffects {
    fn push(&mut self, source: &EffectSource, detail: &EffectDetail, is_active: bool) {
        let source = source.clone();
        let detail = detail.clone();
        match &detail.target {
            EffectTarget::AbilityScore(ability) => {
                let scope = *ability;
                self.ability_scores.push(EffectEntry { source, is_active, scope, detail });
            }
            EffectTarget::SavingThrow(save) => {
                let scope = *save;
                self.saving_throws.push(EffectEntry { source, is_active, scope, detail });
            }
            EffectTarget::AttackRoll(weapon) => {
                let scope = weapon.clone();
                self.attack_rolls.push(EffectEntry { source, is_active, scope, detail });
            }
            EffectTarget::DamageRoll(weapon) => {
                let scope = weapon.clone();
                self.damage_rolls.push(EffectEntry { source, is_active, scope, detail });
            }
            EffectTarget::ArmorClass => {
                self.armor_class.push(EffectEntry { source, is_active, scope: (), detail });
            }
            EffectTarget::HitPoints { per_level } => {
                let scope = *per_level;
                self.hit_points.push(EffectEntry { source, is_active, scope, detail });
            }
            EffectTarget::Initiative => {
                self.initiative.push(EffectEntry { source, is_active, scope: (), detail });
            }
            EffectTarget::Speed => {
                self.speed.push(EffectEntry { source, is_active, scope: (), detail });
            }
            EffectTarget::Skill(skill) => {
                let scope = skill.clone();
                self.skills.push(EffectEntry { source, is_active, scope, detail });
            }
        }
    }
}

/// Aggregates race, class and feat effects of a character.
///
/// Sources are walked in a fixed order (race, class, then feat instances in
/// list order) so bucket order is stable. Conditional effects whose toggle is
/// off are kept with `is_active = false`. Missing definitions are logged and
/// skipped.
pub fn aggregate(character: &Character, catalog: &BuilderCatalog<'_>) -> AggregatedFeatEffects {
    let toggles = ToggleRegistry::build(character, catalog);
    let mut effects = AggregatedFeatEffects::default();

    let mut collect = |source: &EffectSource, details: &[EffectDetail]| {
        for detail in details {
            let is_active = detail
                .condition
                .as_ref()
                .is_none_or(|key| toggles.is_active(key));
            effects.push(source, detail, is_active);
        }
    };

    if let Some(race) = catalog.lookup_race(&character.race) {
        let source = EffectSource::Race {
            id: race.id.clone(),
            label: race.label.clone(),
        };
        collect(&source, &race.effects);
    }

    if let Some(class) = catalog.lookup_class(&character.class) {
        let source = EffectSource::Class {
            id: class.id.clone(),
            label: class.label.clone(),
        };
        collect(&source, &class.effects);
    }

    for instance in &character.feats {
        let Some(feat) = catalog.lookup_feat(instance.definition_id()) else {
            continue;
        };
        let source = EffectSource::Feat {
            instance: instance.instance_id,
            feat: feat.id.clone(),
            label: feat.label.clone(),
            specialization: instance.key.specialization.clone(),
        };
        collect(&source, &feat.effects);
    }

    effects.favored_enemies = FavoredEnemySummary::summarize(character, catalog);
    effects.toggles = toggles;
    effects
}

/// Collects the active entries accepted by `applies` into a stack.
///
/// Symbolic values are resolved with `modifier_of`.
pub fn stack_active<'e, T: 'e>(
    entries: impl IntoIterator<Item = &'e EffectEntry<T>>,
    applies: impl Fn(&EffectEntry<T>) -> bool,
    modifier_of: impl Fn(Ability) -> i32,
) -> BonusStack {
    let mut stack = BonusStack::new();
    for entry in entries {
        if entry.is_active && applies(entry) {
            stack.add(
                entry.label(),
                entry.detail.value.resolve(&modifier_of),
                entry.detail.bonus_type,
            );
        }
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::set_condition;
    use crate::state::{ClassId, ConditionKey, RaceId};
    use crate::test_support::{chosen, fixture_catalog, human_fighter};

    #[test]
    fn effects_land_in_typed_buckets_with_sources() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = human_fighter(4);
        character.feats = vec![
            chosen(1, "dodge", None),
            chosen(2, "weapon_focus", Some("longsword")),
            chosen(3, "alertness", None),
        ];

        let effects = aggregate(&character, &catalog);
        assert_eq!(effects.armor_class.len(), 1);
        assert_eq!(effects.armor_class[0].label(), "Dodge");
        assert_eq!(effects.attack_rolls[0].scope, WeaponScope::Specialization);
        assert_eq!(effects.attack_rolls[0].source.specialization(), Some("longsword"));
        assert_eq!(effects.skills.len(), 2);
        assert!(effects.skills.iter().all(|entry| entry.is_active));
    }

    #[test]
    fn inactive_conditional_effects_are_retained() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = human_fighter(4);
        character.feats = vec![chosen(1, "combat_expertise", None)];

        let effects = aggregate(&character, &catalog);
        assert!(!effects.armor_class.is_empty());
        assert!(effects.armor_class.iter().all(|entry| !entry.is_active));

        let key = ConditionKey::parse("fighting_defensively").unwrap();
        set_condition(&mut character, &catalog, &key, true).unwrap();
        let effects = aggregate(&character, &catalog);
        assert!(effects.armor_class.iter().all(|entry| entry.is_active));
        assert!(effects.toggles.is_active(&key));
    }

    #[test]
    fn race_and_class_effects_come_first() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = Character::new("Pip", RaceId::new("halfling"), ClassId::new("fighter"), 1);
        character.feats = vec![chosen(1, "iron_will", None)];

        let effects = aggregate(&character, &catalog);
        let labels: Vec<_> = effects.saving_throws.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Halfling", "Iron Will"]);
    }

    #[test]
    fn unknown_feats_contribute_nothing() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = human_fighter(1);
        character.feats = vec![chosen(1, "leadership", None)];

        assert_eq!(aggregate(&character, &catalog), AggregatedFeatEffects::default());
    }

    #[test]
    fn stack_active_resolves_symbolic_values() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = human_fighter(1);
        character.feats = vec![chosen(1, "insightful_defense", None)];

        let effects = aggregate(&character, &catalog);
        let stack = stack_active(&effects.armor_class, |_| true, |ability| {
            if ability == Ability::Wisdom { 3 } else { 0 }
        });
        assert_eq!(stack.resolve().total(), 3);
    }
}
