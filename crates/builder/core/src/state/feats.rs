//! Feat instances on a character and the edits that transform the list.
//!
//! All operations here are pure list transformations: they take the current
//! instances and either return the new list or an [`EditRejection`]. The
//! caller commits the returned list; a rejection leaves its state untouched.

use std::collections::BTreeMap;
use std::fmt;

use super::character::Character;
use super::ids::{ConditionKey, FeatId, InstanceId};
use crate::catalog::{BuilderCatalog, GrantedFeat};
use crate::error::EditRejection;

/// Identity of a feat occurrence: the definition plus its optional detail.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatKey {
    pub definition_id: FeatId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub specialization: Option<String>,
}

impl FeatKey {
    pub fn new(definition_id: impl Into<FeatId>) -> Self {
        Self {
            definition_id: definition_id.into(),
            specialization: None,
        }
    }

    pub fn specialized(definition_id: impl Into<FeatId>, specialization: impl Into<String>) -> Self {
        Self {
            definition_id: definition_id.into(),
            specialization: Some(specialization.into()),
        }
    }

    /// True when both keys name the same feat and detail (detail compared
    /// ASCII case-insensitively).
    pub fn matches(&self, other: &FeatKey) -> bool {
        self.definition_id == other.definition_id
            && match (&self.specialization, &other.specialization) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl fmt::Display for FeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.specialization {
            Some(detail) => write!(f, "{} ({})", self.definition_id, detail),
            None => write!(f, "{}", self.definition_id),
        }
    }
}

/// One occurrence of a feat on a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterFeatInstance {
    pub instance_id: InstanceId,
    pub key: FeatKey,
    /// Granted by race or class; does not consume a feat slot.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_granted: bool,
    /// Stored toggle state per condition key referenced by this feat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditional_effect_states: BTreeMap<ConditionKey, bool>,
}

impl CharacterFeatInstance {
    pub fn chosen(instance_id: InstanceId, key: FeatKey) -> Self {
        Self {
            instance_id,
            key,
            is_granted: false,
            conditional_effect_states: BTreeMap::new(),
        }
    }

    pub fn granted(instance_id: InstanceId, key: FeatKey) -> Self {
        Self {
            is_granted: true,
            ..Self::chosen(instance_id, key)
        }
    }

    pub fn definition_id(&self) -> &FeatId {
        &self.key.definition_id
    }

    pub fn specialization(&self) -> Option<&str> {
        self.key.specialization.as_deref()
    }

    /// Stored state of a condition, `false` when never toggled.
    pub fn condition_state(&self, key: &ConditionKey) -> bool {
        self.conditional_effect_states
            .get(key)
            .copied()
            .unwrap_or(false)
    }
}

/// Next free surrogate id: one past the largest in use, starting at 1.
pub fn next_instance_id(instances: &[CharacterFeatInstance]) -> InstanceId {
    let max = instances
        .iter()
        .map(|instance| instance.instance_id.0)
        .max()
        .unwrap_or(0);
    InstanceId(max + 1)
}

/// Adds a chosen feat to the instance list.
///
/// A blank specialization counts as missing.
///
/// # Errors
///
/// - `UnknownFeat` when the catalog has no such feat
/// - `MissingSpecialization` / `UnexpectedSpecialization` when the detail
///   does not fit the definition
/// - `AlreadyTaken` when a single-instance feat is already present
/// - `DuplicateSpecialization` when the same feat and detail are present
pub fn add_feat(
    instances: &[CharacterFeatInstance],
    feat: &FeatId,
    specialization: Option<&str>,
    catalog: &BuilderCatalog<'_>,
) -> Result<Vec<CharacterFeatInstance>, EditRejection> {
    let definition = catalog
        .lookup_feat(feat)
        .ok_or_else(|| EditRejection::UnknownFeat(feat.clone()))?;

    let specialization = specialization
        .map(str::trim)
        .filter(|detail| !detail.is_empty());

    let key = match (definition.requires_specialization(), specialization) {
        (true, None) => return Err(EditRejection::MissingSpecialization(feat.clone())),
        (false, Some(_)) => return Err(EditRejection::UnexpectedSpecialization(feat.clone())),
        (true, Some(detail)) => FeatKey::specialized(feat.clone(), detail),
        (false, None) => FeatKey::new(feat.clone()),
    };

    let repeatable = definition.can_take_multiple_times() || definition.requires_specialization();
    let mut same_feat = instances
        .iter()
        .filter(|instance| instance.definition_id() == feat);

    if !repeatable {
        if same_feat.next().is_some() {
            return Err(EditRejection::AlreadyTaken(feat.clone()));
        }
    } else if let Some(detail) = &key.specialization
        && same_feat.any(|instance| instance.key.matches(&key))
    {
        return Err(EditRejection::DuplicateSpecialization {
            feat: feat.clone(),
            specialization: detail.clone(),
        });
    }

    let instance = CharacterFeatInstance::chosen(next_instance_id(instances), key);
    tracing::debug!(instance = %instance.instance_id, feat = %instance.key, "feat added");

    let mut updated = instances.to_vec();
    updated.push(instance);
    Ok(updated)
}

/// Removes one chosen feat instance.
///
/// # Errors
///
/// `InstanceNotFound` for unknown ids, `GrantedFeat` for granted instances.
pub fn remove_feat(
    instances: &[CharacterFeatInstance],
    instance_id: InstanceId,
) -> Result<Vec<CharacterFeatInstance>, EditRejection> {
    let target = instances
        .iter()
        .find(|instance| instance.instance_id == instance_id)
        .ok_or(EditRejection::InstanceNotFound(instance_id))?;

    if target.is_granted {
        return Err(EditRejection::GrantedFeat(instance_id));
    }

    Ok(instances
        .iter()
        .filter(|instance| instance.instance_id != instance_id)
        .cloned()
        .collect())
}

/// Recomputes the granted instances from race, class and level.
///
/// Granted feats whose acquisition level is reached are present exactly once
/// (race grants first, then class grants). Surviving granted instances keep
/// their surrogate id and toggle state; new ones get fresh ids. Chosen
/// instances follow unchanged and in order.
pub fn sync_granted_feats(
    character: &Character,
    catalog: &BuilderCatalog<'_>,
) -> Vec<CharacterFeatInstance> {
    let level = character.effective_level();
    let race_grants = catalog
        .lookup_race(&character.race)
        .map(|race| race.granted_feats.as_slice())
        .unwrap_or_default();
    let class_grants = catalog
        .lookup_class(&character.class)
        .map(|class| class.granted_feats.as_slice())
        .unwrap_or_default();

    let wanted: Vec<FeatKey> = race_grants
        .iter()
        .chain(class_grants)
        .filter(|grant| grant.level <= level)
        .map(granted_key)
        .collect();

    let mut previous: Vec<&CharacterFeatInstance> =
        character.feats.iter().filter(|f| f.is_granted).collect();
    let mut next_id = next_instance_id(&character.feats).0;
    let mut synced = Vec::with_capacity(wanted.len() + character.feats.len());

    for key in wanted {
        match previous.iter().position(|instance| instance.key.matches(&key)) {
            Some(index) => synced.push(previous.remove(index).clone()),
            None => {
                synced.push(CharacterFeatInstance::granted(InstanceId(next_id), key));
                next_id += 1;
            }
        }
    }

    for dropped in previous {
        tracing::debug!(instance = %dropped.instance_id, feat = %dropped.key, "granted feat no longer reached");
    }

    synced.extend(character.chosen_feats().cloned());
    synced
}

fn granted_key(grant: &GrantedFeat) -> FeatKey {
    FeatKey {
        definition_id: grant.feat.clone(),
        specialization: grant.specialization.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClassId, RaceId};
    use crate::test_support::{chosen, fixture_catalog};

    fn id(feat: &str) -> FeatId {
        FeatId::new(feat)
    }

    #[test]
    fn add_feat_assigns_next_surrogate_id() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let instances = vec![chosen(4, "dodge", None)];

        let updated = add_feat(&instances, &id("power_attack"), None, &catalog).unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[1].instance_id, InstanceId(5));
        assert!(!updated[1].is_granted);
        assert_eq!(next_instance_id(&[]), InstanceId(1));
    }

    #[test]
    fn add_feat_rejects_single_instance_twice() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let instances = vec![chosen(1, "dodge", None)];

        assert_eq!(
            add_feat(&instances, &id("dodge"), None, &catalog),
            Err(EditRejection::AlreadyTaken(id("dodge")))
        );
    }

    #[test]
    fn add_feat_rejects_single_instance_already_granted() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let instances = vec![CharacterFeatInstance::granted(InstanceId(1), FeatKey::new("track"))];

        assert_eq!(
            add_feat(&instances, &id("track"), None, &catalog),
            Err(EditRejection::AlreadyTaken(id("track")))
        );
    }

    #[test]
    fn add_feat_checks_specialization() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let instances = vec![chosen(1, "weapon_focus", Some("longsword"))];

        assert_eq!(
            add_feat(&instances, &id("weapon_focus"), Some("   "), &catalog),
            Err(EditRejection::MissingSpecialization(id("weapon_focus")))
        );
        assert_eq!(
            add_feat(&instances, &id("dodge"), Some("longsword"), &catalog),
            Err(EditRejection::UnexpectedSpecialization(id("dodge")))
        );
        assert_eq!(
            add_feat(&instances, &id("weapon_focus"), Some("Longsword"), &catalog),
            Err(EditRejection::DuplicateSpecialization {
                feat: id("weapon_focus"),
                specialization: "Longsword".into(),
            })
        );

        let updated = add_feat(&instances, &id("weapon_focus"), Some(" rapier "), &catalog).unwrap();
        assert_eq!(updated[1].specialization(), Some("rapier"));
    }

    #[test]
    fn add_feat_allows_repeatable_without_detail() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let once = add_feat(&[], &id("toughness"), None, &catalog).unwrap();
        let twice = add_feat(&once, &id("toughness"), None, &catalog).unwrap();
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn add_feat_rejects_unknown_feat() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        assert_eq!(
            add_feat(&[], &id("leadership"), None, &catalog),
            Err(EditRejection::UnknownFeat(id("leadership")))
        );
    }

    #[test]
    fn remove_feat_refuses_granted_instances() {
        let instances = vec![
            CharacterFeatInstance::granted(InstanceId(1), FeatKey::new("track")),
            chosen(2, "dodge", None),
        ];

        assert_eq!(
            remove_feat(&instances, InstanceId(1)),
            Err(EditRejection::GrantedFeat(InstanceId(1)))
        );
        assert_eq!(
            remove_feat(&instances, InstanceId(9)),
            Err(EditRejection::InstanceNotFound(InstanceId(9)))
        );

        let updated = remove_feat(&instances, InstanceId(2)).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].instance_id, InstanceId(1));
    }

    #[test]
    fn sync_granted_feats_follows_level() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = Character::new("Aldra", RaceId::new("human"), ClassId::new("druid"), 4);
        character.feats = vec![chosen(1, "dodge", None)];

        character.feats = sync_granted_feats(&character, &catalog);
        assert!(!character.feats.iter().any(|f| f.definition_id() == &id("wild_shape")));

        character.level = 5;
        character.feats = sync_granted_feats(&character, &catalog);
        let wild_shape = character
            .feats
            .iter()
            .find(|f| f.definition_id() == &id("wild_shape"))
            .unwrap();
        assert!(wild_shape.is_granted);
        assert_eq!(wild_shape.instance_id, InstanceId(2));
        assert!(character.feats.iter().any(|f| f.instance_id == InstanceId(1)));

        character.level = 3;
        character.feats = sync_granted_feats(&character, &catalog);
        assert_eq!(character.feats, vec![chosen(1, "dodge", None)]);
    }

    #[test]
    fn sync_granted_feats_keeps_surviving_state() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = Character::new("Vess", RaceId::new("human"), ClassId::new("ranger"), 1);
        character.feats = sync_granted_feats(&character, &catalog);
        let key = ConditionKey::parse("provoking_movement").unwrap();
        character.feats[0].conditional_effect_states.insert(key.clone(), true);
        let before = character.feats.clone();

        character.level = 2;
        let after = sync_granted_feats(&character, &catalog);
        assert_eq!(after, before);
        assert!(after[0].condition_state(&key));
    }
}
