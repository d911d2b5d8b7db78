//! Conditional toggle registry.
//!
//! Toggle state is stored per source: every feat instance keeps its own
//! `conditional_effect_states`, and conditional race or class effects keep
//! theirs in `Character::condition_states`. The registry is the read-side
//! view that merges those into one switch per condition key.
//!
//! Activation rules per key:
//! - any permanent source: forced on, not editable
//! - otherwise: on when any source has stored `true`, editable
//!
//! Since a permanent source forces the key on, "all sources permanent and
//! none active" cannot occur and needs no forced-off state.

use std::collections::BTreeMap;

use super::source::EffectSource;
use crate::catalog::BuilderCatalog;
use crate::effect::EffectDetail;
use crate::error::EditRejection;
use crate::state::{Character, ConditionKey};

/// One contributor to a toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ToggleSource {
    pub source: EffectSource,
    pub permanent: bool,
    /// State stored on this source; permanent sources report their stored
    /// value too, though it is ignored.
    pub stored: bool,
}

/// The merged switch for one condition key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ToggleEntry {
    pub key: ConditionKey,
    pub is_active: bool,
    pub is_editable: bool,
    pub sources: Vec<ToggleSource>,
}

impl ToggleEntry {
    fn new(key: ConditionKey) -> Self {
        Self {
            key,
            is_active: false,
            is_editable: true,
            sources: Vec::new(),
        }
    }

    fn add(&mut self, source: ToggleSource) {
        if source.permanent {
            self.is_active = true;
            self.is_editable = false;
        } else if source.stored {
            self.is_active = true;
        }
        self.sources.push(source);
    }
}

/// One entry per condition key referenced by any effect on the character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ToggleRegistry {
    entries: BTreeMap<ConditionKey, ToggleEntry>,
}

impl ToggleRegistry {
    /// Builds the registry from race, class and every feat instance.
    ///
    /// Missing definitions contribute no sources.
    pub fn build(character: &Character, catalog: &BuilderCatalog<'_>) -> Self {
        let mut registry = Self::default();

        if let Ok(race) = catalog.race(&character.race) {
            let source = EffectSource::Race {
                id: race.id.clone(),
                label: race.label.clone(),
            };
            registry.add_sources(&source, &race.effects, false, |key| {
                stored_state(character, key)
            });
        }

        if let Ok(class) = catalog.class(&character.class) {
            let source = EffectSource::Class {
                id: class.id.clone(),
                label: class.label.clone(),
            };
            registry.add_sources(&source, &class.effects, false, |key| {
                stored_state(character, key)
            });
        }

        for instance in &character.feats {
            let Ok(feat) = catalog.feat(instance.definition_id()) else {
                continue;
            };
            let source = EffectSource::Feat {
                instance: instance.instance_id,
                feat: feat.id.clone(),
                label: feat.label.clone(),
                specialization: instance.key.specialization.clone(),
            };
            registry.add_sources(&source, &feat.effects, feat.has_permanent_effect(), |key| {
                instance.condition_state(key)
            });
        }

        registry
    }

    /// Adds `source` once per distinct condition among `effects`.
    fn add_sources(
        &mut self,
        source: &EffectSource,
        effects: &[EffectDetail],
        permanent: bool,
        stored: impl Fn(&ConditionKey) -> bool,
    ) {
        let mut seen: Vec<&ConditionKey> = Vec::new();
        for key in effects.iter().filter_map(|effect| effect.condition.as_ref()) {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            self.entries
                .entry(key.clone())
                .or_insert_with(|| ToggleEntry::new(key.clone()))
                .add(ToggleSource {
                    source: source.clone(),
                    permanent,
                    stored: stored(key),
                });
        }
    }

    pub fn entry(&self, key: &ConditionKey) -> Option<&ToggleEntry> {
        self.entries.get(key)
    }

    /// Unreferenced keys are inactive.
    pub fn is_active(&self, key: &ConditionKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.is_active)
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &ToggleEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn stored_state(character: &Character, key: &ConditionKey) -> bool {
    character.condition_states.get(key).copied().unwrap_or(false)
}

/// Switches a condition on or off for the whole character.
///
/// The new state is written to every source of the key: each feat
/// instance's `conditional_effect_states` and, for race or class sources,
/// `Character::condition_states`.
///
/// # Errors
///
/// `UnknownCondition` when no effect on the character references the key,
/// `ConditionLocked` when a permanent source holds it on. The character is
/// left untouched in both cases.
pub fn set_condition(
    character: &mut Character,
    catalog: &BuilderCatalog<'_>,
    key: &ConditionKey,
    on: bool,
) -> Result<(), EditRejection> {
    let registry = ToggleRegistry::build(character, catalog);
    let entry = registry
        .entry(key)
        .ok_or_else(|| EditRejection::UnknownCondition(key.clone()))?;

    if !entry.is_editable {
        return Err(EditRejection::ConditionLocked(key.clone()));
    }

    for source in &entry.sources {
        match &source.source {
            EffectSource::Feat { instance, .. } => {
                if let Some(target) = character
                    .feats
                    .iter_mut()
                    .find(|feat| feat.instance_id == *instance)
                {
                    target.conditional_effect_states.insert(key.clone(), on);
                }
            }
            EffectSource::Race { .. } | EffectSource::Class { .. } => {
                character.condition_states.insert(key.clone(), on);
            }
        }
    }

    tracing::debug!(condition = %key, on, sources = entry.sources.len(), "condition toggled");
    Ok(())
}
