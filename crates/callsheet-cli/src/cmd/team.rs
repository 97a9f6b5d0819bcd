use crate::output::{print_json, print_table};
use anyhow::Context;
use callsheet_core::config::Config;
use callsheet_core::journal::OpJournal;
use callsheet_core::team::{Profile, Team};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum TeamSubcommand {
    /// Create a new team
    Create {
        slug: String,
        #[arg(long)]
        name: Option<String>,
        /// Email for the first coach profile
        #[arg(long)]
        coach_email: Option<String>,
        /// Display name for the first coach profile
        #[arg(long)]
        coach_name: Option<String>,
    },
    /// List all teams
    List,
    /// Show team details
    Show { slug: String },
    /// Delete a team and everything under it (opponents, pools, terminology)
    Delete { slug: String },
    /// Add or replace a coach profile
    AddCoach {
        slug: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// Remove a coach profile; removing the last one deletes the team
    RemoveCoach {
        slug: String,
        #[arg(long)]
        email: String,
    },
}

pub fn run(root: &Path, subcmd: TeamSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TeamSubcommand::Create {
            slug,
            name,
            coach_email,
            coach_name,
        } => create(root, &slug, name, coach_email, coach_name, json),
        TeamSubcommand::List => list(root, json),
        TeamSubcommand::Show { slug } => show(root, &slug, json),
        TeamSubcommand::Delete { slug } => delete(root, &slug),
        TeamSubcommand::AddCoach {
            slug,
            email,
            name,
            role,
        } => add_coach(root, &slug, email, name, role, json),
        TeamSubcommand::RemoveCoach { slug, email } => remove_coach(root, &slug, &email),
    }
}

fn create(
    root: &Path,
    slug: &str,
    name: Option<String>,
    coach_email: Option<String>,
    coach_name: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let name = name.unwrap_or_else(|| slug.replace('-', " "));
    let coach = coach_email.map(|email| {
        let display = coach_name.unwrap_or_else(|| email.clone());
        Profile::new(email, display)
    });
    let team = Team::create(root, slug, &name, coach)
        .with_context(|| format!("failed to create team '{slug}'"))?;

    if json {
        print_json(&team)?;
    } else {
        println!("Created team: {slug} — {name}");
        println!("Next: callsheet opponent create <slug> --team {slug}");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let teams = Team::list(root).context("failed to list teams")?;

    if json {
        print_json(&teams)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = teams
        .iter()
        .map(|t| {
            vec![
                t.slug.clone(),
                t.name.clone(),
                if t.slug == config.template_team {
                    "template".to_string()
                } else {
                    t.profiles.len().to_string()
                },
            ]
        })
        .collect();
    print_table(&["SLUG", "NAME", "COACHES"], rows);
    Ok(())
}

fn show(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let team = Team::load(root, slug)?;
    let opponents = callsheet_core::opponent::Opponent::list(root, slug)?;

    if json {
        print_json(&serde_json::json!({
            "slug": team.slug,
            "name": team.name,
            "profiles": team.profiles,
            "opponents": opponents,
        }))?;
        return Ok(());
    }

    println!("{} ({})", team.name, team.slug);
    for p in &team.profiles {
        println!("  coach: {} <{}> [{}]", p.name, p.email, p.role);
    }
    for o in &opponents {
        println!("  opponent: {} ({})", o.name, o.slug);
    }
    Ok(())
}

fn delete(root: &Path, slug: &str) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    if slug == config.template_team {
        anyhow::bail!("the template team cannot be deleted");
    }
    let journal = OpJournal::open(&callsheet_core::paths::journal_path(root))?;
    callsheet_core::team::delete_cascade(root, slug, &journal)
        .with_context(|| format!("failed to delete team '{slug}'"))?;
    println!("Deleted team: {slug}");
    Ok(())
}

fn add_coach(
    root: &Path,
    slug: &str,
    email: String,
    name: String,
    role: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut team = Team::load(root, slug)?;
    let mut profile = Profile::new(email, name);
    if let Some(role) = role {
        profile.role = role;
    }
    team.add_profile(profile);
    team.save(root)?;

    if json {
        print_json(&team.profiles)?;
    } else {
        println!("Team '{slug}' now has {} coach(es).", team.profiles.len());
    }
    Ok(())
}

fn remove_coach(root: &Path, slug: &str, email: &str) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let mut team = Team::load(root, slug)?;
    let remaining = team.remove_profile(email)?;
    if remaining == 0 {
        if slug == config.template_team {
            anyhow::bail!("the template team cannot be deleted");
        }
        let journal = OpJournal::open(&callsheet_core::paths::journal_path(root))?;
        callsheet_core::team::delete_cascade(root, slug, &journal)?;
        println!("Removed the last coach; team '{slug}' deleted.");
        return Ok(());
    }
    team.save(root)?;
    println!("Removed coach {email}; {remaining} remaining.");
    Ok(())
}
