//! Skill totals, rank caps and the skill point budget.

use std::collections::BTreeMap;

use super::abilities::{AbilityTable, sizes};
use super::breakdown::{Anomaly, Breakdown, TermKind};
use crate::catalog::{BuilderCatalog, SkillDefinition};
use crate::effect::{AggregatedFeatEffects, stack_active};
use crate::state::{Ability, Character, Ranks, SkillId};

/// One resolved skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkillResult {
    pub skill: SkillId,
    pub label: String,
    pub ranks: Ranks,
    pub is_class_skill: bool,
    pub total: i32,
    /// Highest ranks allowed at the character's level.
    pub cap: Ranks,
    /// Stored ranks exceed the cap; shown as a warning, never clamped.
    pub over_cap: bool,
    pub breakdown: Breakdown,
}

/// Skill points available against skill points spent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkillPointBudget {
    pub per_level: i32,
    pub first_level: i32,
    pub later_levels: i32,
    pub total: i32,
    pub spent: i32,
    /// `total - spent`; negative means overspent.
    pub available: i32,
    /// How `per_level` was reached.
    pub breakdown: Breakdown,
}

impl SkillPointBudget {
    pub fn is_overspent(&self) -> bool {
        self.available < 0
    }
}

/// Rank cap for a skill at a character level.
///
/// Class skills cap at `level + bonus` ranks. Cross-class skills cap at half
/// that, kept at half-rank granularity.
pub fn rank_cap(level: u32, is_class_skill: bool, cap_bonus: i32) -> Ranks {
    let level = i32::try_from(level).unwrap_or(i32::MAX);
    let whole = level.saturating_add(cap_bonus);
    if is_class_skill {
        Ranks::whole(whole)
    } else {
        Ranks::from_halves(whole)
    }
}

/// Resolves every catalog skill plus any skill the character records that
/// the catalog does not know.
pub fn resolve_skills(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
    abilities: &AbilityTable,
    effects: &AggregatedFeatEffects,
) -> BTreeMap<SkillId, SkillResult> {
    let definitions = catalog.skills();
    let mut results = BTreeMap::new();

    for definition in &definitions {
        let result = resolve_skill(
            character,
            catalog,
            abilities,
            effects,
            &definition.id,
            Some(*definition),
            &definitions,
        );
        results.insert(definition.id.clone(), result);
    }

    for skill in character.skills.keys() {
        if results.contains_key(skill) {
            continue;
        }
        let definition = catalog.lookup_skill(skill);
        let result = resolve_skill(
            character,
            catalog,
            abilities,
            effects,
            skill,
            definition,
            &definitions,
        );
        results.insert(skill.clone(), result);
    }

    results
}

fn resolve_skill(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
    abilities: &AbilityTable,
    effects: &AggregatedFeatEffects,
    skill: &SkillId,
    definition: Option<&SkillDefinition>,
    all: &[&SkillDefinition],
) -> SkillResult {
    let rules = catalog.rules();
    let level = character.effective_level();
    let class = catalog.lookup_class(&character.class);
    let instance = character.skills.get(skill);

    let ranks = instance.map(|i| i.ranks).unwrap_or_default();
    let is_class_skill = match instance {
        Some(instance) => instance.is_class_skill,
        None => class.is_some_and(|class| class.is_class_skill(skill)),
    };
    let cap = rank_cap(level, is_class_skill, rules.class_skill_cap_bonus);

    let mut breakdown = Breakdown::new();
    if ranks.is_negative() {
        breakdown.flag(Anomaly::NegativeRanks {
            skill: skill.clone(),
            ranks,
        });
    } else if ranks.is_excessive() {
        breakdown.flag(Anomaly::ExcessiveRanks {
            skill: skill.clone(),
            ranks,
            used: ranks.clamped(),
        });
    }
    breakdown.push(TermKind::Ranks, "Ranks", ranks.clamped().whole_part());

    if let Some(ability) = definition.and_then(|d| d.key_ability) {
        breakdown.push(
            TermKind::Ability,
            format!("{} modifier", ability.label()),
            abilities.modifier(ability),
        );
    }

    for provider in all.iter().filter(|provider| &provider.id != skill) {
        for rule in provider.synergies.iter().filter(|rule| &rule.target == skill) {
            if character.ranks(&provider.id).meets(rule.threshold(rules)) {
                breakdown.push(
                    TermKind::Synergy,
                    format!("Synergy ({})", provider.label),
                    rule.bonus(rules),
                );
            }
        }
    }
    for custom in character
        .custom_synergies
        .iter()
        .filter(|custom| &custom.to == skill && &custom.from != skill)
    {
        if character.ranks(&custom.from).meets(custom.threshold) {
            breakdown.push(
                TermKind::Synergy,
                format!("Synergy ({})", catalog.skill_label(&custom.from)),
                custom.bonus,
            );
        }
    }

    let modifier_of = |ability: Ability| abilities.modifier(ability);
    breakdown.push_stack(
        stack_active(&effects.skills, |entry| &entry.scope == skill, modifier_of).resolve(),
    );

    if let Some(race) = catalog.lookup_race(&character.race) {
        breakdown.push(TermKind::Racial, race.label.as_str(), race.skill_bonus(skill));
    }

    if let Some(definition) = definition {
        let (_, size) = sizes(character, catalog);
        breakdown.push(
            TermKind::Size,
            format!("Size ({size})"),
            definition.size_modifier(size),
        );
        if definition.armor_check_penalty {
            breakdown.push(
                TermKind::ArmorCheck,
                "Armor check penalty",
                character.equipment.check_penalty(),
            );
        }
    }

    breakdown.push(
        TermKind::Misc,
        "Misc",
        instance.map_or(0, |instance| instance.misc_modifier),
    );

    SkillResult {
        skill: skill.clone(),
        label: definition.map_or_else(|| skill.to_string(), |d| d.label.clone()),
        ranks,
        is_class_skill,
        total: breakdown.total,
        cap,
        over_cap: ranks > cap,
        breakdown,
    }
}

/// Computes total, spent and available skill points.
///
/// Per-level points never drop below the configured minimum. Spending is
/// computed in half ranks, so half a cross-class rank costs one point.
pub fn skill_point_budget(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
    abilities: &AbilityTable,
) -> SkillPointBudget {
    let rules = catalog.rules();
    let level = character.effective_level() as i32;
    let mut breakdown = Breakdown::new();

    if !character.has_valid_level() {
        breakdown.flag(Anomaly::InvalidLevel {
            stored: character.level,
            used: character.effective_level(),
        });
    }

    if let Some(class) = catalog.lookup_class(&character.class) {
        breakdown.push(TermKind::Class, class.label.as_str(), class.skill_points);
    }
    breakdown.push(
        TermKind::Ability,
        "Intelligence modifier",
        abilities.modifier(Ability::Intelligence),
    );
    if let Some(race) = catalog.lookup_race(&character.race) {
        breakdown.push(TermKind::Racial, race.label.as_str(), race.bonus_skill_points);
    }
    if breakdown.total < rules.min_skill_points_per_level {
        let floor = rules.min_skill_points_per_level - breakdown.total;
        breakdown.push(TermKind::Adjustment, "Minimum per level", floor);
    }

    let per_level = breakdown.total;
    let first_level = per_level.saturating_mul(rules.first_level_skill_multiplier);
    let later_levels = per_level.saturating_mul((level - 1).max(0));
    let total = first_level.saturating_add(later_levels);

    let cost_in_halves = character
        .skills
        .values()
        .map(|instance| {
            let halves = instance.ranks.clamped().halves();
            if instance.is_class_skill {
                halves
            } else {
                halves.saturating_mul(rules.cross_class_rank_cost)
            }
        })
        .fold(0i32, i32::saturating_add);
    let spent = cost_in_halves.saturating_add(1).div_euclid(2);

    SkillPointBudget {
        per_level,
        first_level,
        later_levels,
        total,
        spent,
        available: total.saturating_sub(spent),
        breakdown,
    }
}
