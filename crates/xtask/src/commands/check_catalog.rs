//! Validate a data directory
//!
//! Loads every catalog file, reports consistency issues, then resolves each
//! sample character under `characters/` and reports what looks wrong there.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use builder_content::{CharacterLoader, ContentFactory};
use builder_core::{BuilderCatalog, CharacterSheet};
use clap::Parser;
use console::style;

use crate::dirs;

/// Validate the catalog files of a data directory
#[derive(Parser)]
pub struct CheckCatalog {
    /// Data directory holding the catalog (defaults to the bundled sample data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Skip resolving the characters under `<DATA>/characters/`
    #[arg(long)]
    skip_characters: bool,
}

impl CheckCatalog {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data);
        println!("{} {}", style("Data Directory:").bold().cyan(), data_dir.display());

        let factory = ContentFactory::new(&data_dir);
        let (snapshot, issues) = factory.load_checked_catalog()?;

        println!(
            "  {} races, {} classes, {} skills, {} feats, {} condition keys",
            snapshot.races.len(),
            snapshot.classes.len(),
            snapshot.skills.len(),
            snapshot.feats.len(),
            snapshot.condition_keys.len()
        );
        println!();

        if issues.is_empty() {
            println!("{} Catalog is consistent", style("✓").green().bold());
        } else {
            println!("{}", style("Catalog issues:").bold().yellow());
            for issue in &issues {
                println!("  {} {}", style("✗").red().bold(), issue);
            }
        }

        let mut character_problems = 0;
        if !self.skip_characters {
            let catalog = snapshot.as_catalog();
            for path in character_files(&data_dir.join("characters"))? {
                character_problems += check_character(&path, &catalog)?;
            }
        }

        if !issues.is_empty() || character_problems > 0 {
            anyhow::bail!(
                "{} catalog issue(s), {} character problem(s)",
                issues.len(),
                character_problems
            );
        }
        Ok(())
    }
}

/// Resolve one character and print its problems; returns how many were found.
fn check_character(path: &Path, catalog: &BuilderCatalog<'_>) -> Result<usize> {
    let character = CharacterLoader::load(path)?;
    let sheet = CharacterSheet::resolve(&character, catalog);

    let mut problems: Vec<String> = sheet.anomalies().iter().map(|a| a.to_string()).collect();
    problems.extend(
        sheet
            .unmet_prerequisites()
            .map(|entry| format!("{} no longer meets its prerequisites", entry.label)),
    );
    if sheet.feat_slots.is_over_allocated() {
        problems.push(format!(
            "{} feat(s) chosen for {} slot(s)",
            sheet.feat_slots.chosen, sheet.feat_slots.total
        ));
    }
    if sheet.skill_points.available < 0 {
        problems.push(format!(
            "{} skill points spent of {}",
            sheet.skill_points.spent, sheet.skill_points.total
        ));
    }
    for skill in sheet.skills.values().filter(|skill| skill.over_cap) {
        problems.push(format!("{} has {} ranks, cap {}", skill.label, skill.ranks, skill.cap));
    }

    println!();
    if problems.is_empty() {
        println!("{} {} ({})", style("✓").green().bold(), sheet.name, path.display());
    } else {
        println!("{} {} ({})", style("✗").red().bold(), sheet.name, path.display());
        for problem in &problems {
            println!("    {}", problem);
        }
    }
    Ok(problems.len())
}

/// Every `.ron` file in the characters directory, sorted by name.
fn character_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read characters directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_files_lists_ron_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.ron"), "").unwrap();
        std::fs::write(dir.path().join("a.ron"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = character_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.ron", "b.ron"]);
    }

    #[test]
    fn missing_characters_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(character_files(&dir.path().join("characters")).unwrap().is_empty());
    }

    #[test]
    fn bundled_characters_have_no_problems() {
        let data_dir = dirs::bundled_data_dir();
        let snapshot = ContentFactory::new(&data_dir).load_catalog().unwrap();
        let catalog = snapshot.as_catalog();
        for path in character_files(&data_dir.join("characters")).unwrap() {
            assert_eq!(check_character(&path, &catalog).unwrap(), 0, "{}", path.display());
        }
    }
}
