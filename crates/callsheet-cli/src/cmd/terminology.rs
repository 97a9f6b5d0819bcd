use crate::output::{print_json, print_table};
use anyhow::{anyhow, Context};
use callsheet_core::config::Config;
use callsheet_core::journal::OpJournal;
use callsheet_core::terminology::{self, TermSet};
use callsheet_core::types::TermCategory;
use clap::Subcommand;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum TerminologySubcommand {
    /// Show a team's effective vocabulary (own entries, else template)
    List {
        /// Limit to one category
        category: Option<String>,
        #[arg(long)]
        team: Option<String>,
    },
    /// Replace one category with a selection from the template library
    Save {
        category: String,
        #[arg(long)]
        team: Option<String>,
        /// Concept keys to keep, repeatable
        #[arg(long = "select", required = true)]
        selected: Vec<String>,
        /// Label overrides as CONCEPT=LABEL, repeatable
        #[arg(long = "rename")]
        renames: Vec<String>,
    },
    /// Drop all customizations and fall back to the template defaults
    Restore {
        #[arg(long)]
        team: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: TerminologySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TerminologySubcommand::List { category, team } => list(root, category, team, json),
        TerminologySubcommand::Save {
            category,
            team,
            selected,
            renames,
        } => save(root, &category, team, selected, renames, json),
        TerminologySubcommand::Restore { team } => restore(root, team),
    }
}

fn list(
    root: &Path,
    category: Option<String>,
    team: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let team = super::resolve_team(root, team.as_deref())?;
    callsheet_core::team::Team::load(root, &team)?;

    let categories: Vec<TermCategory> = match category {
        Some(raw) => vec![TermCategory::from_str(&raw)?],
        None => TermCategory::all().to_vec(),
    };

    let mut rows = Vec::new();
    for cat in &categories {
        let entries = terminology::resolved_for(root, &config.template_team, &team, *cat)?;
        for e in entries {
            rows.push(vec![
                cat.to_string(),
                e.concept.clone(),
                e.label.clone(),
                if e.customized { "yes" } else { "" }.to_string(),
            ]);
        }
    }

    if json {
        let set = TermSet::load(root, &team)?;
        print_json(&serde_json::json!({ "revision": set.revision, "rows": rows }))?;
        return Ok(());
    }
    print_table(&["CATEGORY", "CONCEPT", "LABEL", "CUSTOM"], rows);
    Ok(())
}

fn save(
    root: &Path,
    category: &str,
    team: Option<String>,
    selected: Vec<String>,
    renames: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let team = super::resolve_team(root, team.as_deref())?;
    let category = TermCategory::from_str(category)?;

    let mut overrides: HashMap<String, String> = HashMap::new();
    for raw in &renames {
        let (concept, label) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("expected CONCEPT=LABEL, got '{raw}'"))?;
        overrides.insert(concept.trim().to_string(), label.trim().to_string());
    }

    let journal = OpJournal::open(&callsheet_core::paths::journal_path(root))?;
    let set = terminology::save_category(
        root,
        &config.template_team,
        &team,
        category,
        &selected,
        &overrides,
        None,
        &journal,
    )
    .with_context(|| format!("failed to save {category} terminology"))?;

    if json {
        print_json(&serde_json::json!({
            "revision": set.revision,
            "entries": set.entries_for(category),
        }))?;
    } else {
        println!(
            "Saved {category} for '{team}': {} concepts ({} customized).",
            set.entries_for(category).len(),
            set.entries_for(category).iter().filter(|e| e.customized).count()
        );
    }
    Ok(())
}

fn restore(root: &Path, team: Option<String>) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let team = super::resolve_team(root, team.as_deref())?;
    let journal = OpJournal::open(&callsheet_core::paths::journal_path(root))?;
    terminology::restore(root, &config.template_team, &team, &journal)?;
    println!("Terminology for '{team}' restored to template defaults.");
    Ok(())
}
