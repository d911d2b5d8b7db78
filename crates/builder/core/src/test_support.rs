//! Shared fixtures for unit tests.

use crate::catalog::tables::{CasterProgression, Progression, SaveKind, SaveProgression, SizeCategory};
use crate::catalog::{
    BonusFeatPool, CatalogSnapshot, ClassDefinition, FeatDefinition, FeatFlags, GrantedFeat,
    Prerequisite, RaceDefinition, SkillDefinition, SynergyRule,
};
use crate::config::RulesConfig;
use crate::effect::{BonusType, EffectDetail, EffectTarget, SaveScope, WeaponScope};
use crate::state::{
    Ability, AbilityScoreSet, Character, CharacterFeatInstance, ClassId, ConditionKey, FeatKey,
    InstanceId, RaceId, SkillId,
};

fn key(name: &str) -> ConditionKey {
    ConditionKey::parse(name).unwrap()
}

fn skills(ids: &[&str]) -> Vec<SkillId> {
    ids.iter().map(|id| SkillId::new(*id)).collect()
}

/// STR 16, DEX 14, CON 14, INT 10, WIS 12, CHA 8.
pub fn human_fighter(level: u32) -> Character {
    Character::new("Tam", RaceId::new("human"), ClassId::new("fighter"), level)
        .with_abilities(AbilityScoreSet::new(16, 14, 14, 10, 12, 8))
}

pub fn chosen(id: u32, feat: &str, specialization: Option<&str>) -> CharacterFeatInstance {
    let key = match specialization {
        Some(detail) => FeatKey::specialized(feat, detail),
        None => FeatKey::new(feat),
    };
    CharacterFeatInstance::chosen(InstanceId(id), key)
}

pub fn fixture_catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        races: races(),
        classes: classes(),
        skills: skill_definitions(),
        feats: feats(),
        condition_keys: vec![
            key("fighting_defensively"),
            key("against_giants"),
            key("provoking_movement"),
        ],
        rules: RulesConfig::default(),
    }
}

fn races() -> Vec<RaceDefinition> {
    vec![
        RaceDefinition::new("human", "Human"),
        RaceDefinition {
            base_speed: 20,
            ability_modifiers: vec![(Ability::Constitution, 2), (Ability::Charisma, -2)],
            effects: vec![
                EffectDetail::flat(EffectTarget::ArmorClass, 4)
                    .typed(BonusType::Dodge)
                    .when(key("against_giants")),
            ],
            ..RaceDefinition::new("dwarf", "Dwarf")
        },
        RaceDefinition {
            ability_modifiers: vec![(Ability::Dexterity, 2), (Ability::Constitution, -2)],
            skill_bonuses: vec![(SkillId::new("listen"), 2), (SkillId::new("spot"), 2)],
            ..RaceDefinition::new("elf", "Elf")
        },
        RaceDefinition {
            size: SizeCategory::Small,
            base_speed: 20,
            ability_modifiers: vec![(Ability::Dexterity, 2), (Ability::Strength, -2)],
            skill_bonuses: vec![(SkillId::new("hide"), 2), (SkillId::new("jump"), 2)],
            effects: vec![
                EffectDetail::flat(EffectTarget::SavingThrow(SaveScope::All), 1)
                    .typed(BonusType::Luck),
            ],
            ..RaceDefinition::new("halfling", "Halfling")
        },
    ]
}

fn classes() -> Vec<ClassDefinition> {
    vec![
        ClassDefinition {
            base_attack: Progression::Good,
            fortitude: SaveProgression::Good,
            class_skills: skills(&["climb", "jump"]),
            bonus_feat_pools: vec![BonusFeatPool {
                label: "Fighter bonus feats".into(),
                category: Some("fighter".into()),
                levels: (2..=20).step_by(2).collect(),
            }],
            ..ClassDefinition::new("fighter", "Fighter", 10, 2)
        },
        ClassDefinition {
            base_attack: Progression::Good,
            fortitude: SaveProgression::Good,
            reflex: SaveProgression::Good,
            class_skills: skills(&[
                "climb",
                "hide",
                "jump",
                "knowledge_nature",
                "listen",
                "move_silently",
                "spot",
                "survival",
            ]),
            granted_feats: vec![GrantedFeat::at_level("track", 1)],
            favored_enemy_levels: vec![1, 5, 10, 15, 20],
            ..ClassDefinition::new("ranger", "Ranger", 8, 6)
        },
        ClassDefinition {
            base_attack: Progression::Average,
            reflex: SaveProgression::Good,
            class_skills: skills(&["climb", "hide", "jump", "listen", "move_silently", "spot", "tumble"]),
            ..ClassDefinition::new("rogue", "Rogue", 6, 8)
        },
        ClassDefinition {
            base_attack: Progression::Average,
            fortitude: SaveProgression::Good,
            will: SaveProgression::Good,
            caster: Some(CasterProgression::Full),
            class_skills: skills(&["concentration", "knowledge_nature", "listen", "spot", "survival"]),
            granted_feats: vec![GrantedFeat::at_level("wild_shape", 5)],
            ..ClassDefinition::new("druid", "Druid", 8, 4)
        },
        ClassDefinition {
            will: SaveProgression::Good,
            caster: Some(CasterProgression::Full),
            class_skills: skills(&["concentration", "knowledge_nature", "spellcraft"]),
            granted_feats: vec![GrantedFeat::at_level("scribe_scroll", 1)],
            bonus_feat_pools: vec![BonusFeatPool {
                label: "Wizard bonus feats".into(),
                category: Some("metamagic".into()),
                levels: vec![5, 10, 15, 20],
            }],
            ..ClassDefinition::new("wizard", "Wizard", 4, 2)
        },
    ]
}

fn skill_definitions() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition {
            armor_check_penalty: true,
            ..SkillDefinition::new("climb", "Climb", Some(Ability::Strength))
        },
        SkillDefinition::new("concentration", "Concentration", Some(Ability::Constitution)),
        SkillDefinition {
            armor_check_penalty: true,
            size_modifiers: vec![
                (SizeCategory::Tiny, 8),
                (SizeCategory::Small, 4),
                (SizeCategory::Large, -4),
            ],
            ..SkillDefinition::new("hide", "Hide", Some(Ability::Dexterity))
        },
        SkillDefinition {
            armor_check_penalty: true,
            synergies: vec![SynergyRule::new("tumble")],
            ..SkillDefinition::new("jump", "Jump", Some(Ability::Strength))
        },
        SkillDefinition {
            synergies: vec![SynergyRule::new("survival")],
            ..SkillDefinition::new("knowledge_nature", "Knowledge (nature)", Some(Ability::Intelligence))
        },
        SkillDefinition::new("listen", "Listen", Some(Ability::Wisdom)),
        SkillDefinition {
            armor_check_penalty: true,
            ..SkillDefinition::new("move_silently", "Move Silently", Some(Ability::Dexterity))
        },
        SkillDefinition::new("spellcraft", "Spellcraft", Some(Ability::Intelligence)),
        SkillDefinition::new("spot", "Spot", Some(Ability::Wisdom)),
        SkillDefinition::new("survival", "Survival", Some(Ability::Wisdom)),
        SkillDefinition {
            armor_check_penalty: true,
            ..SkillDefinition::new("tumble", "Tumble", Some(Ability::Dexterity))
        },
    ]
}

fn ability(ability: Ability, minimum: i32) -> Prerequisite {
    Prerequisite::AbilityScore { ability, minimum }
}

fn requires(feat: &str) -> Prerequisite {
    Prerequisite::Feat(feat.into())
}

fn save(kind: SaveKind, value: i32) -> EffectDetail {
    EffectDetail::flat(EffectTarget::SavingThrow(SaveScope::Only(kind)), value)
}

fn skill(id: &str, value: i32) -> EffectDetail {
    EffectDetail::flat(EffectTarget::Skill(SkillId::new(id)), value)
}

fn feats() -> Vec<FeatDefinition> {
    vec![
        FeatDefinition::new("dodge", "Dodge")
            .with_prerequisite(ability(Ability::Dexterity, 13))
            .with_effect(EffectDetail::flat(EffectTarget::ArmorClass, 1).typed(BonusType::Dodge))
            .with_category("fighter"),
        FeatDefinition::new("mobility", "Mobility")
            .with_category("fighter")
            .with_prerequisite(ability(Ability::Dexterity, 13))
            .with_prerequisite(requires("dodge"))
            .with_effect(
                EffectDetail::flat(EffectTarget::ArmorClass, 4)
                    .typed(BonusType::Dodge)
                    .when(key("provoking_movement")),
            ),
        FeatDefinition::new("power_attack", "Power Attack")
            .with_category("fighter")
            .with_prerequisite(ability(Ability::Strength, 13)),
        FeatDefinition::new("cleave", "Cleave")
            .with_category("fighter")
            .with_prerequisite(ability(Ability::Strength, 13))
            .with_prerequisite(requires("power_attack")),
        FeatDefinition::new("weapon_focus", "Weapon Focus")
            .with_category("fighter")
            .with_flags(FeatFlags::SPECIALIZED)
            .with_prerequisite(Prerequisite::BaseAttackBonus(1))
            .with_effect(EffectDetail::flat(
                EffectTarget::AttackRoll(WeaponScope::Specialization),
                1,
            )),
        FeatDefinition::new("weapon_specialization", "Weapon Specialization")
            .with_category("fighter")
            .with_flags(FeatFlags::SPECIALIZED)
            .with_prerequisite(requires("weapon_focus"))
            .with_prerequisite(Prerequisite::Special("Fighter level 4th".into()))
            .with_effect(EffectDetail::flat(
                EffectTarget::DamageRoll(WeaponScope::Specialization),
                2,
            )),
        FeatDefinition::new("combat_expertise", "Combat Expertise")
            .with_category("fighter")
            .with_prerequisite(ability(Ability::Intelligence, 13))
            .with_effect(
                EffectDetail::flat(EffectTarget::ArmorClass, 2)
                    .typed(BonusType::Dodge)
                    .when(key("fighting_defensively")),
            )
            .with_effect(
                EffectDetail::flat(EffectTarget::AttackRoll(WeaponScope::All), -2)
                    .when(key("fighting_defensively")),
            ),
        FeatDefinition::new("defensive_training", "Defensive Training").with_effect(
            EffectDetail::flat(EffectTarget::ArmorClass, 1).when(key("fighting_defensively")),
        ),
        FeatDefinition::new("stalwart_defender", "Stalwart Defender")
            .with_flags(FeatFlags::PERMANENT_EFFECT)
            .with_effect(
                EffectDetail::flat(EffectTarget::ArmorClass, 1).when(key("fighting_defensively")),
            ),
        FeatDefinition::new("toughness", "Toughness")
            .with_flags(FeatFlags::MULTIPLE)
            .with_effect(EffectDetail::flat(EffectTarget::HitPoints { per_level: false }, 3)),
        FeatDefinition::new("hardy", "Hardy")
            .with_effect(EffectDetail::flat(EffectTarget::HitPoints { per_level: true }, 1)),
        FeatDefinition::new("iron_will", "Iron Will").with_effect(save(SaveKind::Will, 2)),
        FeatDefinition::new("great_fortitude", "Great Fortitude")
            .with_effect(save(SaveKind::Fortitude, 2)),
        FeatDefinition::new("lightning_reflexes", "Lightning Reflexes")
            .with_effect(save(SaveKind::Reflex, 2)),
        FeatDefinition::new("great_stamina", "Great Stamina").with_effect(EffectDetail::flat(
            EffectTarget::AbilityScore(Ability::Constitution),
            2,
        )),
        FeatDefinition::new("alertness", "Alertness")
            .with_effect(skill("listen", 2))
            .with_effect(skill("spot", 2)),
        FeatDefinition::new("stealthy", "Stealthy")
            .with_effect(skill("hide", 2))
            .with_effect(skill("move_silently", 2)),
        FeatDefinition::new("insightful_defense", "Insightful Defense").with_effect(
            EffectDetail::symbolic(EffectTarget::ArmorClass, Ability::Wisdom)
                .typed(BonusType::Insight),
        ),
        FeatDefinition::new("improved_initiative", "Improved Initiative")
            .with_category("fighter")
            .with_effect(EffectDetail::flat(EffectTarget::Initiative, 4)),
        FeatDefinition::new("fleet", "Fleet")
            .with_effect(EffectDetail::flat(EffectTarget::Speed, 5)),
        FeatDefinition::new("track", "Track").with_flags(FeatFlags::CLASS_FEATURE),
        FeatDefinition::new("favored_enemy", "Favored Enemy").with_flags(
            FeatFlags::CLASS_FEATURE | FeatFlags::FAVORED_ENEMY | FeatFlags::SPECIALIZED,
        ),
        FeatDefinition::new("wild_shape", "Wild Shape").with_flags(FeatFlags::CLASS_FEATURE),
        FeatDefinition::new("scribe_scroll", "Scribe Scroll")
            .with_category("item_creation")
            .with_prerequisite(Prerequisite::CasterLevel(1)),
        FeatDefinition::new("empower_spell", "Empower Spell").with_category("metamagic"),
        FeatDefinition::new("natural_spell", "Natural Spell")
            .with_prerequisite(ability(Ability::Wisdom, 13))
            .with_prerequisite(Prerequisite::Special(
                "Ability to use the wild shape ability".into(),
            )),
        FeatDefinition::new("arcane_insight", "Arcane Insight")
            .with_prerequisite(Prerequisite::SkillRanks {
                skill: SkillId::new("spellcraft"),
                ranks: 4,
            })
            .with_prerequisite(Prerequisite::CharacterLevel(3))
            .with_prerequisite(Prerequisite::BaseAttackBonus(1)),
        FeatDefinition::new("sea_blessed", "Sea Blessed").with_prerequisite(Prerequisite::Special(
            "Must worship a deity of the sea".into(),
        )),
    ]
}
