//! Full derivation pass over one character.

use std::collections::BTreeMap;

use super::abilities::{AbilityTable, resolve_abilities};
use super::breakdown::{Anomaly, Breakdown};
use super::combat::{CombatStats, resolve_combat};
use super::feat_slots::{FeatSlotReport, resolve_feat_slots};
use super::skills::{SkillPointBudget, SkillResult, resolve_skills, skill_point_budget};
use crate::catalog::BuilderCatalog;
use crate::effect::{AggregatedFeatEffects, aggregate};
use crate::prereq::{PrerequisiteContext, PrerequisiteMessage, meets_prerequisites};
use crate::state::{Character, InstanceId, SkillId};

/// Prerequisite status of one feat instance the character holds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FeatPrerequisites {
    pub instance: InstanceId,
    pub label: String,
    pub messages: Vec<PrerequisiteMessage>,
    pub is_met: bool,
}

/// Every derived number of a character, each with its breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CharacterSheet {
    pub name: String,
    pub level: u32,
    pub effects: AggregatedFeatEffects,
    pub abilities: AbilityTable,
    pub skills: BTreeMap<SkillId, SkillResult>,
    pub skill_points: SkillPointBudget,
    pub feat_slots: FeatSlotReport,
    pub combat: CombatStats,
    pub prerequisites: Vec<FeatPrerequisites>,
}

impl CharacterSheet {
    /// Resolves the whole sheet.
    ///
    /// Effects are aggregated once and abilities resolved once; every other
    /// resolver reads those results.
    pub fn resolve(character: &Character, catalog: &BuilderCatalog<'_>) -> Self {
        let span = tracing::debug_span!(
            "resolve_sheet",
            character = %character.name,
            level = character.level
        );
        let _enter = span.enter();

        let effects = aggregate(character, catalog);
        let abilities = resolve_abilities(character, catalog, &effects);
        let skills = resolve_skills(character, catalog, &abilities, &effects);
        let skill_points = skill_point_budget(character, catalog, &abilities);
        let feat_slots = resolve_feat_slots(character, catalog);
        let combat = resolve_combat(character, catalog, &abilities, &effects);

        let context = PrerequisiteContext::with_abilities(character, catalog, abilities.clone());
        let prerequisites = character
            .feats
            .iter()
            .filter_map(|instance| {
                let feat = catalog.lookup_feat(instance.definition_id())?;
                let messages = context.evaluate(feat);
                Some(FeatPrerequisites {
                    instance: instance.instance_id,
                    label: feat.label.clone(),
                    is_met: meets_prerequisites(&messages),
                    messages,
                })
            })
            .collect();

        let sheet = Self {
            name: character.name.clone(),
            level: character.effective_level(),
            effects,
            abilities,
            skills,
            skill_points,
            feat_slots,
            combat,
            prerequisites,
        };
        tracing::debug!(
            anomalies = sheet.anomalies().len(),
            over_allocated = sheet.feat_slots.is_over_allocated(),
            "sheet resolved"
        );
        sheet
    }

    /// Every breakdown of the sheet, labelled.
    pub fn breakdowns(&self) -> Vec<(String, &Breakdown)> {
        let mut all = Vec::new();
        for ability in self.abilities.iter() {
            all.push((ability.ability.label().to_string(), &ability.breakdown));
        }
        for skill in self.skills.values() {
            all.push((skill.label.clone(), &skill.breakdown));
        }
        all.push(("Skill points".to_string(), &self.skill_points.breakdown));
        all.push(("Feat slots".to_string(), &self.feat_slots.breakdown));
        for (save, breakdown) in &self.combat.saves {
            all.push((save.to_string(), breakdown));
        }
        all.push(("Armor class".to_string(), &self.combat.armor_class));
        for weapon in &self.combat.weapons {
            all.push((format!("{} attack", weapon.weapon), &weapon.attack));
            all.push((format!("{} damage", weapon.weapon), &weapon.damage));
        }
        all.push(("Initiative".to_string(), &self.combat.initiative));
        all.push(("Speed".to_string(), &self.combat.speed));
        all.push(("Hit points".to_string(), &self.combat.hit_points));
        all
    }

    /// Anomalies flagged anywhere on the sheet, duplicates removed.
    pub fn anomalies(&self) -> Vec<&Anomaly> {
        let mut found: Vec<&Anomaly> = Vec::new();
        for (_, breakdown) in self.breakdowns() {
            for anomaly in &breakdown.anomalies {
                if !found.contains(&anomaly) {
                    found.push(anomaly);
                }
            }
        }
        found
    }

    /// Instances whose prerequisites are no longer met.
    pub fn unmet_prerequisites(&self) -> impl Iterator<Item = &FeatPrerequisites> {
        self.prerequisites.iter().filter(|entry| !entry.is_met)
    }
}
