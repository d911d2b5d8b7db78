use crate::state::{ClassId, FeatId, InstanceId, RaceId};

/// Where an aggregated effect came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectSource {
    Race {
        id: RaceId,
        label: String,
    },
    Class {
        id: ClassId,
        label: String,
    },
    Feat {
        instance: InstanceId,
        feat: FeatId,
        label: String,
        specialization: Option<String>,
    },
}

impl EffectSource {
    /// Display label, e.g. `Weapon Focus (longsword)`.
    pub fn label(&self) -> String {
        match self {
            EffectSource::Race { label, .. } | EffectSource::Class { label, .. } => label.clone(),
            EffectSource::Feat {
                label,
                specialization: Some(detail),
                ..
            } => format!("{label} ({detail})"),
            EffectSource::Feat { label, .. } => label.clone(),
        }
    }

    pub fn instance(&self) -> Option<InstanceId> {
        match self {
            EffectSource::Feat { instance, .. } => Some(*instance),
            EffectSource::Race { .. } | EffectSource::Class { .. } => None,
        }
    }

    /// Specialization of the owning feat instance, if any.
    pub fn specialization(&self) -> Option<&str> {
        match self {
            EffectSource::Feat { specialization, .. } => specialization.as_deref(),
            EffectSource::Race { .. } | EffectSource::Class { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feat_labels_include_specialization() {
        let source = EffectSource::Feat {
            instance: InstanceId(3),
            feat: FeatId::new("weapon_focus"),
            label: "Weapon Focus".into(),
            specialization: Some("longsword".into()),
        };
        assert_eq!(source.label(), "Weapon Focus (longsword)");
        assert_eq!(source.instance(), Some(InstanceId(3)));

        let race = EffectSource::Race {
            id: RaceId::new("dwarf"),
            label: "Dwarf".into(),
        };
        assert_eq!(race.label(), "Dwarf");
        assert_eq!(race.specialization(), None);
    }
}
