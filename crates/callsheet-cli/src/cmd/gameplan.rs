use crate::output::print_json;
use anyhow::{anyhow, Context};
use callsheet_core::config::Config;
use callsheet_core::playpool::PlayPool;
use callsheet_core::scouting::ScoutingReport;
use callsheet_core::types::PlayCategory;
use clap::Subcommand;
use gameplan_agent::{ChatClient, GamePlan, Parsed, ScoutingBrief};
use std::path::Path;

#[derive(Subcommand)]
pub enum GameplanSubcommand {
    /// Generate a game plan from the scouting report and active pool
    Generate {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Show the last generated plan
    Show {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        opponent: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: GameplanSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        GameplanSubcommand::Generate { team, opponent } => generate(root, team, opponent, json),
        GameplanSubcommand::Show { team, opponent } => show(root, team, opponent, json),
    }
}

fn brief_from_report(opponent_name: &str, report: &ScoutingReport) -> ScoutingBrief {
    let lines = |looks: &[callsheet_core::scouting::DefensiveLook]| {
        looks
            .iter()
            .map(|l| format!("{} {:.0}%", l.name, l.usage_pct))
            .collect::<Vec<_>>()
    };
    ScoutingBrief {
        opponent: opponent_name.to_string(),
        fronts: lines(&report.fronts),
        coverages: lines(&report.coverages),
        blitzes: lines(&report.blitzes),
        blitz_pct: report.blitz_pct,
        motion_pct: report.motion_pct,
        notes: if report.notes.trim().is_empty() {
            None
        } else {
            Some(report.notes.clone())
        },
    }
}

fn generate(
    root: &Path,
    team: Option<String>,
    opponent: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let (team, opponent) = super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
    let config = Config::load(root)?;
    let o = callsheet_core::opponent::Opponent::load(root, &team, &opponent)?;
    let report = ScoutingReport::load(root, &team, &opponent)
        .context("a scouting report is needed before generating a plan")?;
    let pool = PlayPool::load(root, &team, &opponent)?;

    let sections: Vec<String> = PlayCategory::all()
        .iter()
        .filter_map(|&cat| {
            let calls: Vec<String> = pool
                .active_view(cat)
                .iter()
                .filter(|p| p.is_enabled)
                .map(|p| p.format_call())
                .collect();
            if calls.is_empty() {
                None
            } else {
                Some(format!("{cat}: {}", calls.join(", ")))
            }
        })
        .collect();
    if sections.is_empty() {
        anyhow::bail!("play pool is empty; run `callsheet pool regenerate` first");
    }

    let brief = brief_from_report(&o.name, &report);
    let client = ChatClient::new(
        &config.agent.base_url,
        &config.agent.model,
        &config.agent.api_key_env,
        config.agent.timeout_secs,
    )
    .map_err(|e| anyhow!("{e}"))?;

    let rt = tokio::runtime::Runtime::new()?;
    let raw = rt
        .block_on(client.complete(gameplan_agent::game_plan_messages(&brief, &sections)))
        .map_err(|e| anyhow!("model request failed: {e}"))?;

    let result: Parsed<GamePlan> = gameplan_agent::parse_model_json(&raw);
    let record = serde_json::json!({
        "model": config.agent.model,
        "generated_at": chrono::Utc::now(),
        "result": result,
    });
    let data = serde_yaml::to_string(&record)?;
    callsheet_core::io::atomic_write(
        &callsheet_core::paths::gameplan_path(root, &team, &opponent),
        data.as_bytes(),
    )?;

    match &result {
        Parsed::Ok { value } => {
            if json {
                print_json(value)?;
            } else {
                print_plan(value);
            }
        }
        Parsed::Malformed { raw } => {
            eprintln!("warning: the model did not return a structured plan; raw output follows\n");
            println!("{raw}");
        }
    }
    Ok(())
}

fn show(
    root: &Path,
    team: Option<String>,
    opponent: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let (team, opponent) = super::resolve_matchup(root, team.as_deref(), opponent.as_deref())?;
    let path = callsheet_core::paths::gameplan_path(root, &team, &opponent);
    if !path.exists() {
        anyhow::bail!("no game plan generated yet for {opponent}");
    }
    let data = std::fs::read_to_string(&path)?;
    let record: serde_json::Value = serde_yaml::from_str(&data)?;

    if json {
        print_json(&record)?;
        return Ok(());
    }
    match serde_json::from_value::<Parsed<GamePlan>>(record["result"].clone()) {
        Ok(Parsed::Ok { value }) => print_plan(&value),
        Ok(Parsed::Malformed { raw }) => println!("{raw}"),
        Err(_) => print_json(&record)?,
    }
    Ok(())
}

fn print_plan(plan: &GamePlan) {
    let section = |label: &str, calls: &[String]| {
        if !calls.is_empty() {
            println!("{label}:");
            for call in calls {
                println!("  {call}");
            }
        }
    };
    section("Run game", &plan.run_game);
    section("RPO game", &plan.rpo_game);
    section("Quick game", &plan.quick_game);
    section("Dropback game", &plan.dropback_game);
    section("Shot plays", &plan.shot_plays);
    section("Screen game", &plan.screen_game);
    section("3rd & short", &plan.third_and_short);
    section("3rd & medium", &plan.third_and_medium);
    section("3rd & long", &plan.third_and_long);
    section("Red zone", &plan.red_zone);
    section("Goal line", &plan.goal_line);
    section("Two minute", &plan.two_minute);
    if let Some(notes) = &plan.notes {
        if !notes.trim().is_empty() {
            println!("Notes: {notes}");
        }
    }
}
