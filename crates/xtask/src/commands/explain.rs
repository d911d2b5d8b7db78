//! Explain a character: every derived number with its breakdown
//!
//! Loads the catalog of a data directory, resolves the full sheet of one
//! character file and prints it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use builder_content::{CharacterLoader, ContentFactory};
use builder_core::{Breakdown, BuilderCatalog, Character, CharacterSheet};
use clap::Parser;
use console::style;

use crate::dirs;

/// Print every derived number of a character with its breakdown
#[derive(Parser)]
pub struct Explain {
    /// Character file, or a bare name looked up in `<DATA>/characters/`
    #[arg(value_name = "CHARACTER")]
    character: String,

    /// Data directory holding the catalog (defaults to the bundled sample data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Only show breakdowns whose label contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    only: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Grouped sheet with every breakdown line
    Summary,
    /// Full JSON output of the resolved sheet
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Explain {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data);
        let factory = ContentFactory::new(&data_dir);
        let snapshot = factory
            .load_catalog()
            .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;
        let catalog = snapshot.as_catalog();

        let character_file = dirs::character_path(&data_dir, &self.character);
        let character = CharacterLoader::load(&character_file)?;
        let sheet = CharacterSheet::resolve(&character, &catalog);

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Character File:").bold().cyan(),
                    character_file.display()
                );
                println!("{} {}", style("Data Directory:").bold().cyan(), data_dir.display());
                println!();
                match &self.only {
                    Some(filter) => print_filtered(&sheet, filter),
                    None => print_summary(&character, &sheet, &catalog),
                }
            }
            OutputFormat::Json => print_json(&sheet)?,
            OutputFormat::Debug => println!("{:#?}", sheet),
        }

        Ok(())
    }
}

fn print_summary(character: &Character, sheet: &CharacterSheet, catalog: &BuilderCatalog<'_>) {
    println!(
        "{}",
        style(format!(
            "=== {} - level {} {} {} ===",
            sheet.name,
            sheet.level,
            catalog.race_label(&character.race),
            catalog.class_label(&character.class),
        ))
        .bold()
        .green()
    );
    println!();

    section("Abilities");
    for ability in sheet.abilities.iter() {
        print_breakdown(
            &format!("{} ({:+})", ability.ability.label(), ability.modifier),
            &ability.breakdown,
        );
    }

    section("Combat");
    for (save, breakdown) in &sheet.combat.saves {
        print_breakdown(&format!("{} save", save), breakdown);
    }
    print_breakdown("Armor class", &sheet.combat.armor_class);
    println!("{} {:+}", style("Base attack:").bold(), sheet.combat.base_attack);
    for weapon in &sheet.combat.weapons {
        print_breakdown(&format!("{} attack", weapon.weapon), &weapon.attack);
        print_breakdown(&format!("{} damage", weapon.weapon), &weapon.damage);
    }
    print_breakdown("Initiative", &sheet.combat.initiative);
    print_breakdown("Speed", &sheet.combat.speed);
    print_breakdown("Hit points", &sheet.combat.hit_points);

    section("Skills");
    let budget = &sheet.skill_points;
    println!(
        "  Skill points: {} total, {} spent, {} available",
        budget.total, budget.spent, budget.available
    );
    print_breakdown("Skill points per level", &budget.breakdown);
    if budget.available < 0 {
        warning(&format!("{} skill points overspent", -budget.available));
    }
    for skill in sheet.skills.values() {
        let class_marker = if skill.is_class_skill { "*" } else { "" };
        print_breakdown(
            &format!("{}{} ({} ranks)", skill.label, class_marker, skill.ranks),
            &skill.breakdown,
        );
        if skill.over_cap {
            warning(&format!("{} ranks exceed the cap of {}", skill.ranks, skill.cap));
        }
    }

    section("Feats");
    let slots = &sheet.feat_slots;
    print_breakdown("Feat slots", &slots.breakdown);
    println!(
        "  Chosen: {}, general used: {}, general left: {}, slots left: {}",
        slots.chosen, slots.general_used, slots.general_left, slots.slots_left
    );
    for pool in &slots.class_bonus {
        println!("  {}: {} slot(s), {} used", pool.label, pool.count, pool.used);
    }
    if slots.is_over_allocated() {
        warning(&format!("{} more feat(s) chosen than slots", -slots.slots_left));
    }
    for entry in &sheet.prerequisites {
        let status = if entry.is_met {
            style("met").green()
        } else {
            style("UNMET").red().bold()
        };
        println!("  [{}] {} ({})", entry.instance, entry.label, status);
        for message in &entry.messages {
            let marker = match (message.is_met, message.verified) {
                (_, false) => style("?").yellow(),
                (true, true) => style("+").green(),
                (false, true) => style("-").red(),
            };
            println!("      {} {}", marker, message.text);
        }
    }

    let toggles = &sheet.effects.toggles;
    if !toggles.is_empty() {
        section("Conditional effects");
        for entry in toggles.entries() {
            let state = if entry.is_active { "on" } else { "off" };
            let lock = if entry.is_editable { "" } else { " (permanent)" };
            let sources: Vec<String> = entry
                .sources
                .iter()
                .map(|source| source.source.label())
                .collect();
            println!("  {:<28} {}{}  [{}]", entry.key, state, lock, sources.join(", "));
        }
    }

    let favored = &sheet.effects.favored_enemies;
    if favored.slots > 0 || favored.chosen > 0 {
        section("Favored enemies");
        println!(
            "  Slots: {}, chosen: {}, remaining: {}",
            favored.slots, favored.chosen, favored.remaining
        );
        for enemy in &favored.enemies {
            println!("  {:<28} {:+}", enemy.enemy, enemy.bonus);
        }
    }

    let anomalies = sheet.anomalies();
    if !anomalies.is_empty() {
        section("Anomalies");
        for anomaly in anomalies {
            warning(&anomaly.to_string());
        }
    }
}

fn print_filtered(sheet: &CharacterSheet, filter: &str) {
    let needle = filter.to_lowercase();
    let matches: Vec<_> = sheet
        .breakdowns()
        .into_iter()
        .filter(|(label, _)| label.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        println!("No breakdown matches '{}'", filter);
        return;
    }
    for (label, breakdown) in matches {
        print_breakdown(&label, breakdown);
    }
}

fn print_json(sheet: &CharacterSheet) -> Result<()> {
    let json = serde_json::to_string_pretty(sheet).context("Failed to serialize sheet to JSON")?;
    println!("{}", json);
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", style(format!("{}:", title)).bold().yellow());
}

fn print_breakdown(label: &str, breakdown: &Breakdown) {
    println!("{} {}", style(format!("{}:", label)).bold(), breakdown.total);
    println!("{}", breakdown);
}

fn warning(message: &str) {
    println!("  {} {}", style("!").red().bold(), message);
}
