use crate::output::print_json;
use anyhow::{anyhow, Context};
use callsheet_core::scouting::{DefensiveLook, ScoutingReport};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ScoutingSubcommand {
    /// Show the scouting report
    Show {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Replace the scouting report. Looks are NAME=PCT pairs, repeatable.
    Set {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
        /// Front usage, e.g. --front "4-3=60" --front "3-4=40"
        #[arg(long = "front")]
        fronts: Vec<String>,
        /// Coverage usage, e.g. --coverage "Cover 3=70"
        #[arg(long = "coverage")]
        coverages: Vec<String>,
        /// Blitz usage, e.g. --blitz "Field Dog=20"
        #[arg(long = "blitz")]
        blitzes: Vec<String>,
        #[arg(long, default_value = "0")]
        blitz_pct: f64,
        #[arg(long, default_value = "0")]
        motion_pct: f64,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

/// Parse a `NAME=PCT` pair into a DefensiveLook.
fn parse_look(raw: &str) -> anyhow::Result<DefensiveLook> {
    let (name, pct) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("expected NAME=PCT, got '{raw}'"))?;
    let pct: f64 = pct
        .trim()
        .parse()
        .with_context(|| format!("invalid percentage in '{raw}'"))?;
    if !(0.0..=100.0).contains(&pct) {
        anyhow::bail!("percentage in '{raw}' must be between 0 and 100");
    }
    if name.trim().is_empty() {
        anyhow::bail!("look name in '{raw}' must not be empty");
    }
    Ok(DefensiveLook::new(name.trim(), pct))
}

pub fn run(root: &Path, subcmd: ScoutingSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ScoutingSubcommand::Show { team, opponent } => {
            let (team, opponent) =
                super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
            callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;
            match ScoutingReport::try_load(root, &team, &opponent)? {
                None => println!("No scouting report for {opponent} yet."),
                Some(report) => {
                    if json {
                        print_json(&report)?;
                        return Ok(());
                    }
                    let section = |label: &str, looks: &[DefensiveLook]| {
                        if !looks.is_empty() {
                            let joined: Vec<String> = looks
                                .iter()
                                .map(|l| format!("{} {:.0}%", l.name, l.usage_pct))
                                .collect();
                            println!("{label}: {}", joined.join(", "));
                        }
                    };
                    section("Fronts", &report.fronts);
                    section("Coverages", &report.coverages);
                    section("Blitzes", &report.blitzes);
                    println!(
                        "Blitz rate {:.0}%  Motion response {:.0}%",
                        report.blitz_pct, report.motion_pct
                    );
                    if !report.notes.trim().is_empty() {
                        println!("Notes: {}", report.notes);
                    }
                }
            }
            Ok(())
        }
        ScoutingSubcommand::Set {
            team,
            opponent,
            fronts,
            coverages,
            blitzes,
            blitz_pct,
            motion_pct,
            notes,
        } => {
            let (team, opponent) =
                super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
            callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;

            let mut report = ScoutingReport::try_load(root, &team, &opponent)?
                .unwrap_or_else(ScoutingReport::new);
            report.fronts = fronts.iter().map(|s| parse_look(s)).collect::<anyhow::Result<_>>()?;
            report.coverages = coverages
                .iter()
                .map(|s| parse_look(s))
                .collect::<anyhow::Result<_>>()?;
            report.blitzes = blitzes
                .iter()
                .map(|s| parse_look(s))
                .collect::<anyhow::Result<_>>()?;
            report.blitz_pct = blitz_pct;
            report.motion_pct = motion_pct;
            report.notes = notes;
            report.updated_at = chrono::Utc::now();
            report.save(root, &team, &opponent)?;

            println!(
                "Scouting report saved for {opponent} ({} fronts, {} coverages, {} blitzes).",
                report.fronts.len(),
                report.coverages.len(),
                report.blitzes.len()
            );
            Ok(())
        }
    }
}
