use crate::output::{print_json, print_table};
use anyhow::Context;
use callsheet_core::opponent::Opponent;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum OpponentSubcommand {
    /// Create a new opponent for a team
    Create {
        slug: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        team: Option<String>,
    },
    /// List a team's opponents
    List {
        #[arg(long)]
        team: Option<String>,
    },
    /// Show opponent details
    Show {
        slug: String,
        #[arg(long)]
        team: Option<String>,
    },
    /// Delete an opponent and its scouting report, pool, and game plan
    Delete {
        slug: String,
        #[arg(long)]
        team: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: OpponentSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        OpponentSubcommand::Create { slug, name, team } => {
            let team = super::resolve_team(root, team.as_deref())?;
            let name = name.unwrap_or_else(|| slug.replace('-', " "));
            let opponent = Opponent::create(root, &team, &slug, &name)
                .with_context(|| format!("failed to create opponent '{slug}'"))?;
            if json {
                print_json(&opponent)?;
            } else {
                println!("Created opponent: {slug} — {name} (team {team})");
                println!("Next: callsheet scouting set --team {team} --opponent {slug} …");
            }
            Ok(())
        }
        OpponentSubcommand::List { team } => {
            let team = super::resolve_team(root, team.as_deref())?;
            let opponents = Opponent::list(root, &team)?;
            if json {
                print_json(&opponents)?;
                return Ok(());
            }
            let rows: Vec<Vec<String>> = opponents
                .iter()
                .map(|o| {
                    let scouted = callsheet_core::paths::scouting_path(root, &team, &o.slug)
                        .exists();
                    vec![
                        o.slug.clone(),
                        o.name.clone(),
                        if scouted { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            print_table(&["SLUG", "NAME", "SCOUTED"], rows);
            Ok(())
        }
        OpponentSubcommand::Show { slug, team } => {
            let team = super::resolve_team(root, team.as_deref())?;
            let opponent = Opponent::load(root, &team, &slug)?;
            let pool = callsheet_core::playpool::PlayPool::load(root, &team, &slug)?;
            if json {
                print_json(&serde_json::json!({
                    "slug": opponent.slug,
                    "name": opponent.name,
                    "pool_size": pool.plays.len(),
                    "pool_revision": pool.revision,
                }))?;
                return Ok(());
            }
            println!("{} ({}) — team {team}", opponent.name, opponent.slug);
            println!("  pool: {} plays (revision {})", pool.plays.len(), pool.revision);
            Ok(())
        }
        OpponentSubcommand::Delete { slug, team } => {
            let team = super::resolve_team(root, team.as_deref())?;
            Opponent::delete(root, &team, &slug)
                .with_context(|| format!("failed to delete opponent '{slug}'"))?;
            println!("Deleted opponent: {slug}");
            Ok(())
        }
    }
}
