//! Favored enemy sub-result.
//!
//! Favored enemy bonuses do not come from a flat effect value: they depend on
//! how many favored enemy slots the class has reached and how many enemies the
//! character has chosen. Every chosen enemy within the slot count receives the
//! base bonus; each slot beyond the first adds one more base bonus to the
//! first chosen enemy. Choices beyond the slot count receive nothing.

use crate::catalog::BuilderCatalog;
use crate::state::{Character, InstanceId};

/// One chosen favored enemy and its resolved bonus.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FavoredEnemy {
    pub instance: InstanceId,
    pub enemy: String,
    /// Bonus to damage and to the tracking skills against this enemy.
    pub bonus: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FavoredEnemySummary {
    /// Slots reached at the current class level.
    pub slots: u32,
    pub chosen: u32,
    /// `slots - chosen`; negative when over-allocated.
    pub remaining: i32,
    pub enemies: Vec<FavoredEnemy>,
}

impl FavoredEnemySummary {
    /// Resolve the favored enemy selections of a character.
    pub fn summarize(character: &Character, catalog: &BuilderCatalog<'_>) -> Self {
        let slots = catalog
            .lookup_class(&character.class)
            .map_or(0, |class| class.favored_enemy_slots(character.effective_level()));
        let per_slot = catalog.rules().favored_enemy_bonus;

        let enemies: Vec<FavoredEnemy> = character
            .feats
            .iter()
            .filter_map(|instance| {
                let feat = catalog.feat(instance.definition_id()).ok()?;
                feat.is_favored_enemy().then(|| (instance, feat))
            })
            .enumerate()
            .map(|(index, (instance, feat))| {
                let index = index as u32;
                let bonus = match index {
                    i if i >= slots => 0,
                    0 => per_slot * slots as i32,
                    _ => per_slot,
                };
                FavoredEnemy {
                    instance: instance.instance_id,
                    enemy: instance
                        .specialization()
                        .map_or_else(|| feat.label.clone(), str::to_string),
                    bonus,
                }
            })
            .collect();

        let chosen = enemies.len() as u32;
        Self {
            slots,
            chosen,
            remaining: slots as i32 - chosen as i32,
            enemies,
        }
    }

    pub fn is_over_allocated(&self) -> bool {
        self.remaining < 0
    }

    /// Bonus against a named enemy, zero when not favored.
    pub fn bonus_against(&self, enemy: &str) -> i32 {
        self.enemies
            .iter()
            .filter(|favored| favored.enemy.eq_ignore_ascii_case(enemy))
            .map(|favored| favored.bonus)
            .max()
            .unwrap_or(0)
    }
}
