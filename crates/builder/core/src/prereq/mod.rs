//! Feat prerequisite evaluation.
//!
//! Every clause of a feat's prerequisite list is evaluated on its own and
//! reported as one [`PrerequisiteMessage`], in declaration order. Nothing
//! short-circuits: the UI shows all clauses with their status.
mod special;

pub use special::{SpecialClause, parse_special};

use crate::catalog::{BuilderCatalog, FeatDefinition, Prerequisite};
use crate::effect::aggregate;
use crate::state::Character;
use crate::stats::{AbilityTable, resolve_abilities};

/// Outcome of one prerequisite clause.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrerequisiteMessage {
    pub text: String,
    pub is_met: bool,
    /// `false` when the clause could not be checked and is assumed met.
    pub verified: bool,
}

impl PrerequisiteMessage {
    fn checked(text: impl Into<String>, is_met: bool) -> Self {
        Self {
            text: text.into(),
            is_met,
            verified: true,
        }
    }
}

/// The character values prerequisites are checked against.
///
/// Resolving abilities needs a full effect aggregation, so evaluating many
/// feats should share one context.
pub struct PrerequisiteContext<'a> {
    character: &'a Character,
    catalog: BuilderCatalog<'a>,
    abilities: AbilityTable,
    base_attack: i32,
    caster_level: u32,
}

impl<'a> PrerequisiteContext<'a> {
    pub fn new(character: &'a Character, catalog: &BuilderCatalog<'a>) -> Self {
        let effects = aggregate(character, catalog);
        let abilities = resolve_abilities(character, catalog, &effects);
        Self::with_abilities(character, catalog, abilities)
    }

    /// Builds a context from already resolved abilities.
    pub fn with_abilities(
        character: &'a Character,
        catalog: &BuilderCatalog<'a>,
        abilities: AbilityTable,
    ) -> Self {
        let level = character.effective_level();
        let class = catalog.lookup_class(&character.class);
        Self {
            character,
            catalog: *catalog,
            abilities,
            base_attack: class.map_or(0, |class| class.base_attack.base_attack(level)),
            caster_level: class.map_or(0, |class| class.caster_level(level)),
        }
    }

    /// One message per prerequisite clause of `feat`.
    pub fn evaluate(&self, feat: &FeatDefinition) -> Vec<PrerequisiteMessage> {
        feat.prerequisites
            .iter()
            .map(|clause| self.evaluate_clause(clause))
            .collect()
    }

    fn evaluate_clause(&self, clause: &Prerequisite) -> PrerequisiteMessage {
        let character = self.character;
        match clause {
            Prerequisite::BaseAttackBonus(minimum) => PrerequisiteMessage::checked(
                format!("Base attack bonus +{minimum}"),
                self.base_attack >= *minimum,
            ),
            Prerequisite::AbilityScore { ability, minimum } => PrerequisiteMessage::checked(
                format!("{} {minimum}", ability.label()),
                self.abilities.score(*ability) >= *minimum,
            ),
            Prerequisite::SkillRanks { skill, ranks } => PrerequisiteMessage::checked(
                format!("{} {ranks} ranks", self.catalog.skill_label(skill)),
                character.ranks(skill).meets(*ranks),
            ),
            Prerequisite::Feat(required) => PrerequisiteMessage::checked(
                self.catalog.feat_label(required),
                character
                    .feats
                    .iter()
                    .any(|instance| instance.definition_id() == required),
            ),
            Prerequisite::CasterLevel(minimum) => PrerequisiteMessage::checked(
                format!("Caster level {minimum}"),
                self.caster_level >= *minimum,
            ),
            Prerequisite::CharacterLevel(minimum) => PrerequisiteMessage::checked(
                format!("Character level {minimum}"),
                character.effective_level() >= *minimum,
            ),
            Prerequisite::Special(text) => self.evaluate_special(text),
        }
    }

    fn evaluate_special(&self, text: &str) -> PrerequisiteMessage {
        let character = self.character;
        match parse_special(text, &self.catalog) {
            SpecialClause::ClassLevel { class, level } => PrerequisiteMessage::checked(
                text,
                character.class == class && character.effective_level() >= level,
            ),
            SpecialClause::WildShape => {
                let has_wild_shape = character.feats.iter().any(|instance| {
                    let label = self.catalog.feat_label(instance.definition_id());
                    [instance.definition_id().as_str(), label.as_str()]
                        .iter()
                        .any(|name| {
                            let name = name.to_ascii_lowercase();
                            name.contains("wild shape") || name.contains("wild_shape")
                        })
                });
                PrerequisiteMessage::checked(text, has_wild_shape)
            }
            SpecialClause::Unrecognized => {
                tracing::debug!(clause = text, "special prerequisite not recognized; assumed met");
                PrerequisiteMessage {
                    text: text.to_string(),
                    is_met: true,
                    verified: false,
                }
            }
        }
    }
}

/// Evaluates every prerequisite clause of `feat` for `character`.
pub fn evaluate(
    feat: &FeatDefinition,
    character: &Character,
    catalog: &BuilderCatalog<'_>,
) -> Vec<PrerequisiteMessage> {
    PrerequisiteContext::new(character, catalog).evaluate(feat)
}

/// True when every clause is met; a feat without clauses is always met.
pub fn meets_prerequisites(messages: &[PrerequisiteMessage]) -> bool {
    messages.iter().all(|message| message.is_met)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AbilityScoreSet, ClassId, FeatId, RaceId, Ranks};
    use crate::test_support::{chosen, fixture_catalog, human_fighter};

    fn feat<'s>(snapshot: &'s crate::catalog::CatalogSnapshot, id: &str) -> &'s FeatDefinition {
        snapshot.feats.iter().find(|f| f.id.as_str() == id).unwrap()
    }

    #[test]
    fn one_message_per_clause_in_declaration_order() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let character = human_fighter(1);
        let cleave = feat(&snapshot, "cleave");

        let messages = evaluate(cleave, &character, &catalog);
        assert_eq!(messages.len(), cleave.prerequisites.len());
        assert_eq!(messages[0].text, "Strength 13");
        assert!(messages[0].is_met);
        assert_eq!(messages[1].text, "Power Attack");
        assert!(!messages[1].is_met);
        assert!(!meets_prerequisites(&messages));
    }

    #[test]
    fn unmet_clauses_do_not_short_circuit() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let weak = human_fighter(1).with_abilities(AbilityScoreSet::uniform(8));
        let messages = evaluate(feat(&snapshot, "cleave"), &weak, &catalog);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|message| !message.is_met));
    }

    #[test]
    fn feat_without_clauses_is_met() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let messages = evaluate(feat(&snapshot, "toughness"), &human_fighter(1), &catalog);
        assert!(messages.is_empty());
        assert!(meets_prerequisites(&messages));
    }

    #[test]
    fn feat_clause_matches_specialized_instances() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let mut character = human_fighter(4);
        character.feats = vec![chosen(1, "weapon_focus", Some("longsword"))];

        let messages = evaluate(feat(&snapshot, "weapon_specialization"), &character, &catalog);
        let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Weapon Focus", "Fighter level 4th"]);
        assert!(meets_prerequisites(&messages));

        let mut rogue = character.clone();
        rogue.class = ClassId::new("rogue");
        let messages = evaluate(feat(&snapshot, "weapon_specialization"), &rogue, &catalog);
        assert!(messages[0].is_met);
        assert!(!messages[1].is_met);
    }

    #[test]
    fn ability_clause_uses_resolved_scores() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let base = AbilityScoreSet::new(10, 12, 10, 10, 10, 10);
        let human = human_fighter(1).with_abilities(base);
        let halfling = Character::new("Pip", RaceId::new("halfling"), ClassId::new("fighter"), 1)
            .with_abilities(base);

        let dodge = feat(&snapshot, "dodge");
        assert!(!meets_prerequisites(&evaluate(dodge, &human, &catalog)));
        assert!(meets_prerequisites(&evaluate(dodge, &halfling, &catalog)));
    }

    #[test]
    fn level_and_skill_clauses() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let wizard = Character::new("Ilse", RaceId::new("elf"), ClassId::new("wizard"), 1)
            .with_skill("spellcraft", Ranks::whole(4), true);

        let messages = evaluate(feat(&snapshot, "scribe_scroll"), &wizard, &catalog);
        assert_eq!(messages[0].text, "Caster level 1");
        assert!(messages[0].is_met);

        let fighter = human_fighter(1);
        assert!(!meets_prerequisites(&evaluate(feat(&snapshot, "scribe_scroll"), &fighter, &catalog)));

        let messages = evaluate(feat(&snapshot, "arcane_insight"), &wizard, &catalog);
        let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Spellcraft 4 ranks", "Character level 3", "Base attack bonus +1"]);
        let met: Vec<_> = messages.iter().map(|m| m.is_met).collect();
        assert_eq!(met, vec![true, false, false]);
    }

    #[test]
    fn wild_shape_clause_checks_granted_feature() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let natural_spell = feat(&snapshot, "natural_spell");
        let mut druid = Character::new("Aldra", RaceId::new("human"), ClassId::new("druid"), 5)
            .with_abilities(AbilityScoreSet::new(10, 10, 10, 10, 14, 10));

        let messages = evaluate(natural_spell, &druid, &catalog);
        assert!(!messages[1].is_met);

        druid.feats = crate::state::sync_granted_feats(&druid, &catalog);
        let messages = evaluate(natural_spell, &druid, &catalog);
        assert!(messages.iter().all(|m| m.is_met && m.verified));
    }

    #[test]
    fn unrecognized_special_text_is_met_but_unverified() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let messages = evaluate(feat(&snapshot, "sea_blessed"), &human_fighter(1), &catalog);
        assert_eq!(
            messages,
            vec![PrerequisiteMessage {
                text: "Must worship a deity of the sea".into(),
                is_met: true,
                verified: false,
            }]
        );
        assert!(meets_prerequisites(&messages));
    }

    #[test]
    fn unknown_required_feat_uses_raw_id() {
        let mut snapshot = fixture_catalog();
        snapshot.feats.push(
            FeatDefinition::new("orphan", "Orphan")
                .with_prerequisite(Prerequisite::Feat(FeatId::new("lost_art"))),
        );
        let catalog = snapshot.as_catalog();
        let orphan = feat(&snapshot, "orphan");
        let messages = evaluate(orphan, &human_fighter(1), &catalog);
        assert_eq!(messages[0].text, "lost_art");
        assert!(!messages[0].is_met);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let snapshot = fixture_catalog();
        let catalog = snapshot.as_catalog();
        let character = human_fighter(4);
        let context = PrerequisiteContext::new(&character, &catalog);
        let cleave = feat(&snapshot, "cleave");
        assert_eq!(context.evaluate(cleave), context.evaluate(cleave));
    }
}
