use crate::output::{print_json, print_table};
use anyhow::{anyhow, Context};
use callsheet_core::config::Config;
use callsheet_core::playpool::PlayPool;
use callsheet_core::scouting::ScoutingReport;
use callsheet_core::session::SessionContext;
use callsheet_core::types::PlayCategory;
use clap::Subcommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum PoolSubcommand {
    /// Show the active play pool (locked first, capped per category)
    Show {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
        /// Limit to one category
        #[arg(long)]
        category: Option<String>,
    },
    /// Rebuild unlocked plays from the master library against the scouting report
    Regenerate {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
        /// Per-category counts as CATEGORY=N, repeatable; omit for configured targets
        #[arg(long = "target")]
        targets: Vec<String>,
        /// Seed the draw for reproducible pools
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Lock a play so regeneration keeps it
    Lock {
        id: Uuid,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Unlock a play
    Unlock {
        id: Uuid,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Toggle a play's enabled flag
    Enable {
        id: Uuid,
        #[arg(long)]
        value: bool,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Toggle a play's favorite flag
    Favorite {
        id: Uuid,
        #[arg(long)]
        value: bool,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Set or clear the coach's custom call string
    Edit {
        id: Uuid,
        /// The call string; omit to clear the customization
        #[arg(long)]
        call: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Remove a play from the pool
    Remove {
        id: Uuid,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: PoolSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PoolSubcommand::Show {
            team,
            opponent,
            category,
        } => show(root, team, opponent, category, json),
        PoolSubcommand::Regenerate {
            team,
            opponent,
            targets,
            seed,
        } => regenerate(root, team, opponent, targets, seed, json),
        PoolSubcommand::Lock { id, team, opponent } => {
            mutate(root, team, opponent, |pool| pool.set_locked(id, true))?;
            println!("Locked {id}");
            Ok(())
        }
        PoolSubcommand::Unlock { id, team, opponent } => {
            mutate(root, team, opponent, |pool| pool.set_locked(id, false))?;
            println!("Unlocked {id}");
            Ok(())
        }
        PoolSubcommand::Enable {
            id,
            value,
            team,
            opponent,
        } => {
            mutate(root, team, opponent, |pool| pool.set_enabled(id, value))?;
            println!("{} {id}", if value { "Enabled" } else { "Disabled" });
            Ok(())
        }
        PoolSubcommand::Favorite {
            id,
            value,
            team,
            opponent,
        } => {
            mutate(root, team, opponent, |pool| pool.set_favorite(id, value))?;
            println!("Favorite = {value} for {id}");
            Ok(())
        }
        PoolSubcommand::Edit {
            id,
            call,
            team,
            opponent,
        } => {
            mutate(root, team, opponent, |pool| pool.edit_call(id, call))?;
            println!("Updated call for {id}");
            Ok(())
        }
        PoolSubcommand::Remove { id, team, opponent } => {
            mutate(root, team, opponent, |pool| pool.remove(id).map(|_| ()))?;
            println!("Removed {id}");
            Ok(())
        }
    }
}

fn mutate<F>(
    root: &Path,
    team: Option<String>,
    opponent: Option<String>,
    f: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&mut PlayPool) -> callsheet_core::Result<()>,
{
    let (team, opponent) = super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
    callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;
    let mut pool = PlayPool::load(root, &team, &opponent)?;
    f(&mut pool)?;
    pool.save(root, &team, &opponent)?;
    Ok(())
}

fn show(
    root: &Path,
    team: Option<String>,
    opponent: Option<String>,
    category: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let (team, opponent) = super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
    callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;
    let pool = PlayPool::load(root, &team, &opponent)?;

    let categories: Vec<PlayCategory> = match category {
        Some(raw) => vec![PlayCategory::from_str(&raw)?],
        None => PlayCategory::all().to_vec(),
    };

    if json {
        let view: BTreeMap<String, Vec<serde_json::Value>> = categories
            .iter()
            .map(|&cat| {
                let plays: Vec<serde_json::Value> = pool
                    .active_view(cat)
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "id": p.id,
                            "call": p.format_call(),
                            "locked": p.is_locked,
                            "enabled": p.is_enabled,
                            "favorite": p.is_favorite,
                        })
                    })
                    .collect();
                (cat.to_string(), plays)
            })
            .collect();
        print_json(&serde_json::json!({ "revision": pool.revision, "categories": view }))?;
        return Ok(());
    }

    let mut rows = Vec::new();
    for &cat in &categories {
        for play in pool.active_view(cat) {
            rows.push(vec![
                cat.to_string(),
                play.id.to_string(),
                play.format_call(),
                crate::output::play_flags(play.is_locked, play.is_favorite, play.is_enabled),
            ]);
        }
    }
    print_table(&["CATEGORY", "ID", "CALL", "FLAGS"], rows);
    crate::output::print_revision(pool.revision);
    Ok(())
}

fn regenerate(
    root: &Path,
    team: Option<String>,
    opponent: Option<String>,
    raw_targets: Vec<String>,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let (team, opponent) = super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
    let config = Config::load(root)?;
    callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;

    let report = ScoutingReport::load(root, &team, &opponent)
        .context("regeneration needs a scouting report; run `callsheet scouting set` first")?;

    let targets: BTreeMap<PlayCategory, usize> = if raw_targets.is_empty() {
        let session = SessionContext::load(root)?;
        session.effective_targets(&config.resolved_targets())
    } else {
        let mut parsed = BTreeMap::new();
        for raw in &raw_targets {
            let (cat, n) = raw
                .split_once('=')
                .ok_or_else(|| anyhow!("expected CATEGORY=N, got '{raw}'"))?;
            parsed.insert(
                PlayCategory::from_str(cat.trim())?,
                n.trim().parse::<usize>().with_context(|| format!("invalid count in '{raw}'"))?,
            );
        }
        parsed
    };

    let mut pool = PlayPool::load(root, &team, &opponent)?;
    let master = PlayPool::load_master(root, &config.template_team)?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let summary = callsheet_core::selector::regenerate(&mut pool, &master, &report, &targets, &mut rng);
    pool.save(root, &team, &opponent)?;

    if json {
        print_json(&summary)?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = summary
        .fills
        .iter()
        .map(|f| {
            vec![
                f.category.to_string(),
                f.target.to_string(),
                f.locked_kept.to_string(),
                f.drawn.to_string(),
                f.unmet.to_string(),
            ]
        })
        .collect();
    print_table(&["CATEGORY", "TARGET", "LOCKED", "DRAWN", "UNMET"], rows);
    crate::output::print_revision(pool.revision);
    Ok(())
}
