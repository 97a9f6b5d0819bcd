use crate::output::print_json;
use anyhow::{anyhow, Context};
use callsheet_core::session::SessionContext;
use callsheet_core::types::PlayCategory;
use clap::Subcommand;
use std::path::Path;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum SessionSubcommand {
    /// Show the current session context
    Show,
    /// Update the selected team/opponent and preferences
    Set {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
        #[arg(long)]
        motion_pct: Option<f64>,
        /// Per-category targets as CATEGORY=N, repeatable
        #[arg(long = "target")]
        targets: Vec<String>,
    },
    /// Clear the session context
    Clear,
}

pub fn run(root: &Path, subcmd: SessionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SessionSubcommand::Show => {
            let session = SessionContext::load(root)?;
            if json {
                print_json(&session)?;
                return Ok(());
            }
            println!("team:      {}", session.team.as_deref().unwrap_or("(none)"));
            println!("opponent:  {}", session.opponent.as_deref().unwrap_or("(none)"));
            println!("motion:    {:.0}%", session.motion_pct);
            for (cat, n) in &session.targets {
                println!("target.{cat}: {n}");
            }
            Ok(())
        }
        SessionSubcommand::Set {
            team,
            opponent,
            motion_pct,
            targets,
        } => {
            let mut session = SessionContext::load(root)?;
            if let Some(team) = team {
                callsheet_core::team::Team::load(root, &team)?;
                session.team = Some(team);
            }
            if let Some(opponent) = opponent {
                let team = session
                    .team
                    .clone()
                    .ok_or_else(|| anyhow!("select a team before an opponent"))?;
                callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;
                session.opponent = Some(opponent);
            }
            if let Some(pct) = motion_pct {
                if !(0.0..=100.0).contains(&pct) {
                    anyhow::bail!("motion_pct must be between 0 and 100");
                }
                session.motion_pct = pct;
            }
            for raw in &targets {
                let (cat, n) = raw
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected CATEGORY=N, got '{raw}'"))?;
                session.targets.insert(
                    PlayCategory::from_str(cat.trim())?,
                    n.trim()
                        .parse::<usize>()
                        .with_context(|| format!("invalid count in '{raw}'"))?,
                );
            }
            session.save(root)?;
            if json {
                print_json(&session)?;
            } else {
                println!(
                    "Session: team={} opponent={}",
                    session.team.as_deref().unwrap_or("(none)"),
                    session.opponent.as_deref().unwrap_or("(none)")
                );
            }
            Ok(())
        }
        SessionSubcommand::Clear => {
            SessionContext::default().save(root)?;
            println!("Session cleared.");
            Ok(())
        }
    }
}
