//! Combat statistics: saves, armor class, attacks, initiative, speed and
//! hit points.

use std::collections::BTreeMap;

use super::abilities::{AbilityTable, sizes};
use super::breakdown::{Breakdown, TermKind};
use crate::catalog::BuilderCatalog;
use crate::catalog::tables::SaveKind;
use crate::effect::{AggregatedFeatEffects, BonusStack, EffectEntry, WeaponScope, stack_active};
use crate::state::{Ability, Character, Weapon};

/// Attack and damage of one wielded weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WeaponAttack {
    pub weapon: String,
    pub attack: Breakdown,
    pub damage: Breakdown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CombatStats {
    pub base_attack: i32,
    pub saves: BTreeMap<SaveKind, Breakdown>,
    pub armor_class: Breakdown,
    pub weapons: Vec<WeaponAttack>,
    pub initiative: Breakdown,
    pub speed: Breakdown,
    pub hit_points: Breakdown,
}

/// True when an attack or damage effect with `scope` applies to `weapon`.
///
/// `Specialization` scopes match when the owning feat instance names the
/// weapon.
pub fn weapon_scope_applies(entry: &EffectEntry<WeaponScope>, weapon: &Weapon) -> bool {
    match &entry.scope {
        WeaponScope::All => true,
        WeaponScope::Melee => weapon.is_melee(),
        WeaponScope::Ranged => !weapon.is_melee(),
        WeaponScope::Weapon(name) => name.eq_ignore_ascii_case(&weapon.name),
        WeaponScope::Specialization => entry
            .source
            .specialization()
            .is_some_and(|detail| detail.eq_ignore_ascii_case(&weapon.name)),
    }
}

pub fn resolve_combat(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
    abilities: &AbilityTable,
    effects: &AggregatedFeatEffects,
) -> CombatStats {
    let level = character.effective_level();
    let class = catalog.lookup_class(&character.class);
    let modifier_of = |ability: Ability| abilities.modifier(ability);
    let (_, size) = sizes(character, catalog);
    let size_modifier = size.attack_and_ac_modifier();
    let base_attack = class.map_or(0, |class| class.base_attack.base_attack(level));

    let saves = SaveKind::ALL
        .into_iter()
        .map(|save| {
            let mut breakdown = Breakdown::new();
            if let Some(class) = class {
                breakdown.push(
                    TermKind::Class,
                    format!("{} base", class.label),
                    class.save_progression(save).base_save(level),
                );
            }
            let ability = save.key_ability();
            breakdown.push(
                TermKind::Ability,
                format!("{} modifier", ability.label()),
                abilities.modifier(ability),
            );
            breakdown.push_stack(
                stack_active(&effects.saving_throws, |e| e.scope.applies_to(save), modifier_of)
                    .resolve(),
            );
            (save, breakdown)
        })
        .collect();

    let mut armor_class = Breakdown::new();
    armor_class.push(TermKind::Base, "Base", 10);
    for worn in character.equipment.armor.iter().chain(character.equipment.shield.iter()) {
        armor_class.push(TermKind::Equipment, worn.label.as_str(), worn.armor_bonus);
    }
    let dexterity = abilities.modifier(Ability::Dexterity);
    let capped_dexterity = character
        .equipment
        .max_dex_bonus()
        .map_or(dexterity, |cap| dexterity.min(cap));
    armor_class.push(TermKind::Ability, "Dexterity modifier", capped_dexterity);
    armor_class.push(TermKind::Size, format!("Size ({size})"), size_modifier);
    armor_class.push_stack(stack_active(&effects.armor_class, |_| true, modifier_of).resolve());

    let weapons = character
        .equipment
        .weapons
        .iter()
        .map(|weapon| {
            let mut attack = Breakdown::new();
            attack.push(TermKind::BaseAttack, "Base attack bonus", base_attack);
            let (label, value) = attack_ability(weapon, abilities);
            attack.push(TermKind::Ability, label, value);
            attack.push(TermKind::Size, format!("Size ({size})"), size_modifier);
            attack.push(TermKind::Equipment, "Enhancement", weapon.enhancement);
            attack.push_stack(
                stack_active(
                    &effects.attack_rolls,
                    |e| weapon_scope_applies(e, weapon),
                    modifier_of,
                )
                .resolve(),
            );

            let mut damage = Breakdown::new();
            if weapon.is_melee() {
                let strength = abilities.modifier(Ability::Strength);
                if weapon.two_handed && strength > 0 {
                    damage.push(
                        TermKind::Ability,
                        "Strength modifier (two-handed)",
                        strength * 3 / 2,
                    );
                } else {
                    damage.push(TermKind::Ability, "Strength modifier", strength);
                }
            }
            damage.push(TermKind::Equipment, "Enhancement", weapon.enhancement);
            damage.push_stack(
                stack_active(
                    &effects.damage_rolls,
                    |e| weapon_scope_applies(e, weapon),
                    modifier_of,
                )
                .resolve(),
            );

            WeaponAttack {
                weapon: weapon.name.clone(),
                attack,
                damage,
            }
        })
        .collect();

    let mut initiative = Breakdown::new();
    initiative.push(TermKind::Ability, "Dexterity modifier", dexterity);
    initiative.push_stack(stack_active(&effects.initiative, |_| true, modifier_of).resolve());

    let mut speed = Breakdown::new();
    match catalog.lookup_race(&character.race) {
        Some(race) => speed.push(
            TermKind::Racial,
            format!("{} base speed", race.label),
            race.base_speed,
        ),
        None => speed.push(TermKind::Base, "Base speed", 30),
    }
    speed.push_stack(stack_active(&effects.speed, |_| true, modifier_of).resolve());

    CombatStats {
        base_attack,
        saves,
        armor_class,
        weapons,
        initiative,
        speed,
        hit_points: hit_points(character, catalog, abilities, effects),
    }
}

/// Ability used to hit with a weapon: STR for melee, DEX for ranged, the
/// better of the two for finesse weapons.
fn attack_ability(weapon: &Weapon, abilities: &AbilityTable) -> (&'static str, i32) {
    let strength = abilities.modifier(Ability::Strength);
    let dexterity = abilities.modifier(Ability::Dexterity);
    match (weapon.is_melee(), weapon.finesse) {
        (true, true) if dexterity > strength => ("Dexterity modifier (finesse)", dexterity),
        (true, _) => ("Strength modifier", strength),
        (false, _) => ("Dexterity modifier", dexterity),
    }
}

/// Maximum hit die at first level, the rounded-up average afterwards, and
/// the CON modifier per level. Each level yields at least one hit point.
fn hit_points(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
    abilities: &AbilityTable,
    effects: &AggregatedFeatEffects,
) -> Breakdown {
    let level = character.effective_level() as i32;
    let mut breakdown = Breakdown::new();

    if let Some(class) = catalog.lookup_class(&character.class) {
        let die = class.hit_die as i32;
        breakdown.push(TermKind::HitDice, format!("First level (d{die})"), die);
        breakdown.push(
            TermKind::HitDice,
            format!("Levels 2-{level} (d{die} average)"),
            (level - 1) * (die / 2 + 1),
        );
    }
    breakdown.push(
        TermKind::Ability,
        "Constitution modifier per level",
        abilities.modifier(Ability::Constitution) * level,
    );
    if breakdown.total < level {
        let floor = level - breakdown.total;
        breakdown.push(TermKind::Adjustment, "Minimum 1 per level", floor);
    }

    let modifier_of = |ability: Ability| abilities.modifier(ability);
    let mut stack = BonusStack::new();
    for entry in effects.hit_points.iter().filter(|entry| entry.is_active) {
        let value = entry.detail.value.resolve(modifier_of);
        if entry.scope {
            stack.add(format!("{} (per level)", entry.label()), value * level, entry.detail.bonus_type);
        } else {
            stack.add(entry.label(), value, entry.detail.bonus_type);
        }
    }
    breakdown.push_stack(stack.resolve());
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{aggregate, set_condition};
    use crate::state::{AbilityScoreSet, Armor, ClassId, ConditionKey, Equipment, RaceId};
    use crate::stats::resolve_abilities;
    use crate::test_support::{chosen, fixture_catalog, human_fighter};

    fn combat(character: &Character) -> CombatStats {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let effects = aggregate(character, &catalog);
        let abilities = resolve_abilities(character, &catalog, &effects);
        resolve_combat(character, &catalog, &abilities, &effects)
    }

    #[test]
    fn saves_combine_class_ability_and_effects() {
        let mut character = human_fighter(4);
        character.feats = vec![chosen(1, "iron_will", None)];

        let stats = combat(&character);
        // STR 16, DEX 14, CON 14, INT 10, WIS 12, CHA 8
        assert_eq!(stats.saves[&SaveKind::Fortitude].total, 4 + 2);
        assert_eq!(stats.saves[&SaveKind::Reflex].total, 1 + 2);
        assert_eq!(stats.saves[&SaveKind::Will].total, 1 + 1 + 2);
    }

    #[test]
    fn armor_caps_dexterity_and_dodge_stacks() {
        let mut character = human_fighter(1)
            .with_abilities(AbilityScoreSet::new(10, 18, 10, 10, 10, 10))
            .with_equipment(Equipment {
                armor: Some(Armor::new("Chain shirt", 4).with_max_dex_bonus(2)),
                shield: Some(Armor::new("Buckler", 1)),
                weapons: Vec::new(),
            });
        character.feats = vec![chosen(1, "dodge", None)];

        let stats = combat(&character);
        assert_eq!(stats.armor_class.sum_of(TermKind::Ability), 2);
        assert_eq!(stats.armor_class.total, 10 + 4 + 1 + 2 + 1);
    }

    #[test]
    fn symbolic_armor_class_effect_uses_resolved_modifier() {
        let mut character = human_fighter(1).with_abilities(AbilityScoreSet::new(10, 10, 10, 10, 17, 10));
        character.feats = vec![chosen(1, "insightful_defense", None)];
        let stats = combat(&character);
        assert_eq!(stats.armor_class.total, 10 + 3);
    }

    #[test]
    fn conditional_armor_class_counts_only_when_toggled() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = human_fighter(1).with_abilities(AbilityScoreSet::uniform(10));
        character.feats = vec![chosen(1, "combat_expertise", None)];
        assert_eq!(combat(&character).armor_class.total, 10);

        let key = ConditionKey::parse("fighting_defensively").unwrap();
        set_condition(&mut character, &catalog, &key, true).unwrap();
        let stats = combat(&character);
        assert_eq!(stats.armor_class.total, 12);
    }

    #[test]
    fn weapon_focus_applies_to_its_weapon_only() {
        let mut character = human_fighter(4).with_equipment(Equipment {
            weapons: vec![
                crate::state::Weapon::melee("longsword").with_enhancement(1),
                crate::state::Weapon::ranged("shortbow"),
                crate::state::Weapon::melee("greatsword").two_handed(),
            ],
            ..Equipment::default()
        });
        character.feats = vec![
            chosen(1, "weapon_focus", Some("Longsword")),
            chosen(2, "weapon_specialization", Some("longsword")),
        ];

        let stats = combat(&character);
        let [longsword, shortbow, greatsword] = stats.weapons.as_slice() else {
            panic!("expected three weapons");
        };
        assert_eq!(longsword.attack.total, 4 + 3 + 1 + 1);
        assert_eq!(longsword.damage.total, 3 + 1 + 2);
        assert_eq!(shortbow.attack.total, 4 + 2);
        assert_eq!(shortbow.damage.total, 0);
        assert_eq!(greatsword.damage.total, 4);
    }

    #[test]
    fn finesse_uses_better_ability() {
        let character = human_fighter(1)
            .with_abilities(AbilityScoreSet::new(8, 16, 10, 10, 10, 10))
            .with_equipment(Equipment {
                weapons: vec![crate::state::Weapon::melee("rapier").finesse()],
                ..Equipment::default()
            });
        let stats = combat(&character);
        assert_eq!(stats.weapons[0].attack.total, 1 + 3);
        assert_eq!(stats.weapons[0].damage.total, -1);
    }

    #[test]
    fn small_size_modifies_attack_and_armor_class() {
        let character = Character::new("Pip", RaceId::new("halfling"), ClassId::new("fighter"), 1)
            .with_abilities(AbilityScoreSet::uniform(10))
            .with_equipment(Equipment {
                weapons: vec![crate::state::Weapon::melee("shortsword")],
                ..Equipment::default()
            });
        let stats = combat(&character);
        assert_eq!(stats.armor_class.sum_of(TermKind::Size), 1);
        assert_eq!(stats.weapons[0].attack.sum_of(TermKind::Size), 1);
        assert_eq!(stats.speed.total, 20);
    }

    #[test]
    fn initiative_and_speed_effects() {
        let mut character = human_fighter(1);
        character.feats = vec![chosen(1, "improved_initiative", None), chosen(2, "fleet", None)];
        let stats = combat(&character);
        assert_eq!(stats.initiative.total, 2 + 4);
        assert_eq!(stats.speed.total, 30 + 5);
    }

    #[test]
    fn hit_points_use_max_first_die_then_average() {
        let mut character = human_fighter(3);
        character.feats = vec![chosen(1, "toughness", None), chosen(2, "toughness", None)];
        let stats = combat(&character);
        // d10: 10 + 2 * 6, CON 14 adds 2 per level, toughness twice
        assert_eq!(stats.hit_points.total, 10 + 12 + 6 + 3 + 3);
    }

    #[test]
    fn hit_points_floor_at_one_per_level() {
        let character = Character::new("Ilse", RaceId::new("elf"), ClassId::new("wizard"), 2)
            .with_abilities(AbilityScoreSet::new(10, 10, 3, 10, 10, 10));
        let stats = combat(&character);
        // d4: 4 + 3, CON 1 (elf -2) gives -5 per level
        assert_eq!(stats.hit_points.total, 2);
        assert_eq!(stats.hit_points.sum_of(TermKind::Adjustment), 2 - (4 + 3 - 10));
    }

    #[test]
    fn per_level_hit_point_effects_scale() {
        let mut character = human_fighter(5).with_abilities(AbilityScoreSet::uniform(10));
        character.feats = vec![chosen(1, "hardy", None)];
        let stats = combat(&character);
        assert_eq!(stats.hit_points.sum_of(TermKind::Effect), 5);
    }
}
