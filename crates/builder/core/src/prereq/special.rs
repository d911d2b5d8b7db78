//! Free-text "special" prerequisite clauses.
//!
//! Catalogs phrase a few requirements in prose. Two phrasings are
//! recognized: `"<class> level <n>"` (ordinal suffixes allowed, e.g.
//! "Fighter level 4th") and anything mentioning the wild shape ability.
//! Everything else is [`SpecialClause::Unrecognized`].

use crate::catalog::BuilderCatalog;
use crate::state::ClassId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpecialClause {
    ClassLevel { class: ClassId, level: u32 },
    WildShape,
    Unrecognized,
}

/// Matches `text` against the known phrasings.
///
/// The class is looked up by id or label (ASCII case-insensitive), trying the
/// longest phrase before the word "level" first. A class the catalog does not
/// know is taken from the single word before "level".
pub fn parse_special(text: &str, catalog: &BuilderCatalog<'_>) -> SpecialClause {
    let lower = text.to_ascii_lowercase();
    if lower.contains("wild shape") || lower.contains("wild_shape") {
        return SpecialClause::WildShape;
    }

    let words: Vec<&str> = lower
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '_'))
        .filter(|word| !word.is_empty())
        .collect();

    let Some(position) = words.iter().position(|word| *word == "level") else {
        return SpecialClause::Unrecognized;
    };
    if position == 0 {
        return SpecialClause::Unrecognized;
    }
    let Some(level) = words.get(position + 1).and_then(|word| parse_ordinal(word)) else {
        return SpecialClause::Unrecognized;
    };

    let classes = catalog.classes();
    let matched = (0..position).find_map(|start| {
        let phrase = words[start..position].join(" ");
        classes
            .iter()
            .find(|class| {
                class.id.as_str().eq_ignore_ascii_case(&phrase.replace(' ', "_"))
                    || class.label.eq_ignore_ascii_case(&phrase)
            })
            .map(|class| class.id.clone())
    });

    let class = matched.unwrap_or_else(|| ClassId::new(words[position - 1]));
    SpecialClause::ClassLevel { class, level }
}

/// `4`, `4th`, `1st`, `2nd`, `3rd`.
fn parse_ordinal(word: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word);
    digits.parse().ok()
}
