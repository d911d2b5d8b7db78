//! Apply feat and toggle edits to a character file
//!
//! Edits run in a fixed order: removals, additions, granted-feat sync, then
//! toggles. Any rejected edit aborts the command before the file is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use builder_content::{CharacterLoader, ContentFactory};
use builder_core::{
    CharacterSheet, ConditionKey, FeatId, InstanceId, add_feat, remove_feat, set_condition,
    sync_granted_feats,
};
use clap::Parser;
use console::style;

use crate::dirs;

/// Apply feat and toggle edits to a character file
#[derive(Parser)]
pub struct Edit {
    /// Character file, or a bare name looked up in `<DATA>/characters/`
    #[arg(value_name = "CHARACTER")]
    character: String,

    /// Data directory holding the catalog (defaults to the bundled sample data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Add a chosen feat, e.g. `dodge` or `weapon_focus:longsword`
    #[arg(long = "add-feat", value_name = "FEAT[:DETAIL]", value_parser = parse_feat)]
    add: Vec<FeatArg>,

    /// Remove a chosen feat instance by id
    #[arg(long = "remove-feat", value_name = "INSTANCE")]
    remove: Vec<u32>,

    /// Switch a conditional effect, e.g. `fighting_defensively=on`
    #[arg(long = "set", value_name = "KEY=on|off", value_parser = parse_toggle)]
    toggles: Vec<(ConditionKey, bool)>,

    /// Recompute granted feats from race, class and level
    #[arg(long)]
    sync_granted: bool,

    /// Write the result here instead of overwriting the input file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Apply the edits and report, without writing anything
    #[arg(long)]
    dry_run: bool,
}

/// A feat id with an optional specialization detail.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FeatArg {
    feat: FeatId,
    specialization: Option<String>,
}

fn parse_feat(value: &str) -> Result<FeatArg, String> {
    let (feat, specialization) = match value.split_once(':') {
        Some((feat, detail)) => (feat.trim(), Some(detail.trim().to_string())),
        None => (value.trim(), None),
    };
    if feat.is_empty() {
        return Err("feat id is empty".to_string());
    }
    Ok(FeatArg {
        feat: FeatId::new(feat),
        specialization,
    })
}

fn parse_toggle(value: &str) -> Result<(ConditionKey, bool), String> {
    let (key, state) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=on|off, got '{}'", value))?;
    let on = match state.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        other => return Err(format!("expected on or off, got '{}'", other)),
    };
    let key = ConditionKey::parse(key.trim()).map_err(|e| e.to_string())?;
    Ok((key, on))
}

impl Edit {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data);
        let snapshot = ContentFactory::new(&data_dir).load_catalog()?;
        let catalog = snapshot.as_catalog();

        let input = dirs::character_path(&data_dir, &self.character);
        let mut character = CharacterLoader::load(&input)?;

        for id in self.remove {
            let instance = InstanceId(id);
            let label = character
                .feat_instance(instance)
                .map(|feat| feat.key.to_string())
                .unwrap_or_default();
            character.feats = remove_feat(&character.feats, instance)
                .with_context(|| format!("Cannot remove feat instance {}", instance))?;
            println!("{} Removed [{}] {}", style("-").red().bold(), instance, label);
        }

        for arg in self.add {
            character.feats = add_feat(
                &character.feats,
                &arg.feat,
                arg.specialization.as_deref(),
                &catalog,
            )
            .with_context(|| format!("Cannot add feat '{}'", arg.feat))?;
            if let Some(added) = character.feats.last() {
                println!(
                    "{} Added [{}] {}",
                    style("+").green().bold(),
                    added.instance_id,
                    added.key
                );
            }
        }

        if self.sync_granted {
            let before = character.feats.iter().filter(|feat| feat.is_granted).count();
            character.feats = sync_granted_feats(&character, &catalog);
            let after = character.feats.iter().filter(|feat| feat.is_granted).count();
            println!(
                "{} Granted feats synced ({} -> {})",
                style("~").cyan().bold(),
                before,
                after
            );
        }

        for (key, on) in self.toggles {
            set_condition(&mut character, &catalog, &key, on)
                .with_context(|| format!("Cannot switch '{}'", key))?;
            println!(
                "{} {} {}",
                style("~").cyan().bold(),
                key,
                if on { "on" } else { "off" }
            );
        }

        let sheet = CharacterSheet::resolve(&character, &catalog);
        println!();
        println!(
            "{} {} chosen, {} slot(s), {} left",
            style("Feat Slots:").bold().cyan(),
            sheet.feat_slots.chosen,
            sheet.feat_slots.total,
            sheet.feat_slots.slots_left
        );
        for entry in sheet.unmet_prerequisites() {
            println!(
                "  {} {} no longer meets its prerequisites",
                style("!").red().bold(),
                entry.label
            );
        }

        if self.dry_run {
            println!("{}", style("Dry run: nothing written").dim());
            return Ok(());
        }

        let output = self.output.unwrap_or(input);
        CharacterLoader::save(&output, &character)?;
        println!("{} {}", style("Saved:").bold().cyan(), output.display());
        Ok(())
    }
}
