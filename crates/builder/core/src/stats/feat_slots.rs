//! Feat slot accounting.
//!
//! General slots come from the creation slot, level advancement and the
//! race. Class bonus pools add slots that may be restricted to a feat
//! category. Granted feats never consume a slot, and neither do picks of a
//! class feature (favored enemy selections are budgeted by the class).

use super::breakdown::{Anomaly, Breakdown, TermKind};
use crate::catalog::{BonusFeatPool, BuilderCatalog, FeatDefinition};
use crate::state::Character;

/// One class bonus feat pool as reached at the character's level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassBonusPool {
    pub label: String,
    /// `None` accepts any feat.
    pub category: Option<String>,
    pub count: u32,
    pub used: u32,
}

impl ClassBonusPool {
    pub fn remaining(&self) -> i32 {
        self.count as i32 - self.used as i32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FeatSlotReport {
    /// Creation slot plus level advancement.
    pub base: i32,
    pub racial: i32,
    pub class_bonus: Vec<ClassBonusPool>,
    pub total: i32,
    /// Chosen instances that need a feat slot.
    pub chosen: u32,
    /// Chosen instances placed in general slots.
    pub general_used: u32,
    /// General slots still open; when zero only pool-restricted picks remain.
    pub general_left: i32,
    /// `total - chosen`; negative when over-allocated.
    pub slots_left: i32,
    pub breakdown: Breakdown,
}

impl FeatSlotReport {
    pub fn is_over_allocated(&self) -> bool {
        self.slots_left < 0
    }
}

/// Counts feat slots and places every chosen feat instance.
///
/// A chosen feat whose category matches a restricted pool with room goes
/// there first, then into a general slot, then into an unrestricted pool.
/// Anything left over is counted against the general slots.
pub fn resolve_feat_slots(character: &Character, catalog: &BuilderCatalog<'_>) -> FeatSlotReport {
    let rules = catalog.rules();
    let level = character.effective_level();
    let mut breakdown = Breakdown::new();

    if !character.has_valid_level() {
        breakdown.flag(Anomaly::InvalidLevel {
            stored: character.level,
            used: character.effective_level(),
        });
    }

    breakdown.push(TermKind::Base, "Starting feat", rules.base_feat_slots);
    breakdown.push(TermKind::Base, "Level advancement", rules.periodic_feat_slots(level));
    let base = breakdown.total;

    let racial = catalog
        .lookup_race(&character.race)
        .map_or(0, |race| {
            breakdown.push(TermKind::Racial, race.label.as_str(), race.bonus_feat_slots as i32);
            race.bonus_feat_slots as i32
        });

    let definitions: Vec<&BonusFeatPool> = catalog
        .lookup_class(&character.class)
        .map(|class| class.bonus_feat_pools.iter().collect())
        .unwrap_or_default();
    let mut pools: Vec<ClassBonusPool> = definitions
        .iter()
        .map(|pool| ClassBonusPool {
            label: pool.label.clone(),
            category: pool.category.clone(),
            count: pool.count_at(level),
            used: 0,
        })
        .collect();
    for pool in &pools {
        breakdown.push(TermKind::Class, pool.label.as_str(), pool.count as i32);
    }

    let general = base + racial;
    let mut general_used = 0u32;
    let mut chosen = 0u32;

    for instance in character.chosen_feats() {
        let definition = catalog.feat(instance.definition_id()).ok();
        if definition.is_some_and(FeatDefinition::is_class_feature) {
            continue;
        }
        chosen += 1;
        let category = definition.and_then(|feat| feat.category.as_deref());

        let restricted = pools.iter_mut().zip(&definitions).find(|(pool, definition)| {
            definition.category.is_some() && definition.accepts(category) && pool.used < pool.count
        });
        if let Some((pool, _)) = restricted {
            pool.used += 1;
            continue;
        }
        if (general_used as i32) < general {
            general_used += 1;
            continue;
        }
        let unrestricted = pools
            .iter_mut()
            .find(|pool| pool.category.is_none() && pool.used < pool.count);
        match unrestricted {
            Some(pool) => pool.used += 1,
            None => general_used += 1,
        }
    }

    let total = breakdown.total;
    FeatSlotReport {
        base,
        racial,
        class_bonus: pools,
        total,
        chosen,
        general_used,
        general_left: general - general_used as i32,
        slots_left: total - chosen as i32,
        breakdown,
    }
}
