use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::playpool::PlayPool;
use callsheet_core::scouting::ScoutingReport;
use callsheet_core::types::PlayCategory;
use gameplan_agent::{ChatClient, GamePlan, Parsed, ScoutingBrief};

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// What gets persisted after a generation run. A malformed model response is
/// stored too, so the coach can read the raw text instead of losing the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePlanRecord {
    pub model: String,
    pub generated_at: DateTime<Utc>,
    pub result: Parsed<GamePlan>,
}

impl GamePlanRecord {
    fn load(
        root: &std::path::Path,
        team: &str,
        opponent: &str,
    ) -> callsheet_core::Result<Option<Self>> {
        let path = callsheet_core::paths::gameplan_path(root, team, opponent);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        let record: GamePlanRecord = serde_yaml::from_str(&data)?;
        Ok(Some(record))
    }

    fn save(&self, root: &std::path::Path, team: &str, opponent: &str) -> callsheet_core::Result<()> {
        let data = serde_yaml::to_string(self)?;
        callsheet_core::io::atomic_write(
            &callsheet_core::paths::gameplan_path(root, team, opponent),
            data.as_bytes(),
        )
    }
}

// ---------------------------------------------------------------------------
// Prompt inputs
// ---------------------------------------------------------------------------

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

/// One "category: call, call, …" line per category with enabled active plays.
fn pool_sections(pool: &PlayPool) -> Vec<String> {
    PlayCategory::all()
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
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/teams/:team/opponents/:opponent/gameplan — the last generated
/// plan, 404 when none has been generated yet.
pub async fn get_gameplan(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
        GamePlanRecord::load(&root, &team, &opponent)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match result {
        Some(record) => Ok(Json(serde_json::json!(record))),
        None => Err(AppError::not_found("no game plan generated yet")),
    }
}

/// POST /api/teams/:team/opponents/:opponent/gameplan/generate — build the
/// prompt from the scouting report and active pool, run the model, persist
/// whatever comes back.
pub async fn generate_gameplan(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let (config, brief, sections) = {
        let team = team.clone();
        let opponent = opponent.clone();
        tokio::task::spawn_blocking(move || {
            let config = callsheet_core::config::Config::load(&root)?;
            let o = callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
            let report = ScoutingReport::load(&root, &team, &opponent)?;
            let pool = PlayPool::load(&root, &team, &opponent)?;
            let brief = brief_from_report(&o.name, &report);
            let sections = pool_sections(&pool);
            Ok::<_, callsheet_core::CallsheetError>((config, brief, sections))
        })
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??
    };

    if sections.is_empty() {
        return Err(AppError::conflict(
            "play pool is empty; regenerate it before generating a plan",
        ));
    }

    let client = ChatClient::new(
        &config.agent.base_url,
        &config.agent.model,
        &config.agent.api_key_env,
        config.agent.timeout_secs,
    )
    .map_err(AppError::agent)?;

    let messages = gameplan_agent::game_plan_messages(&brief, &sections);
    let raw = client.complete(messages).await.map_err(AppError::agent)?;
    let result: Parsed<GamePlan> = gameplan_agent::parse_model_json(&raw);
    if !result.is_ok() {
        tracing::warn!(team = %team, opponent = %opponent, "model output was not valid plan JSON");
    }

    let record = GamePlanRecord {
        model: config.agent.model.clone(),
        generated_at: Utc::now(),
        result,
    };

    let saved = {
        let root = app.root.clone();
        let record = record.clone();
        let team = team.clone();
        let opponent = opponent.clone();
        tokio::task::spawn_blocking(move || record.save(&root, &team, &opponent))
            .await
            .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))
    };
    saved??;

    let _ = app.event_tx.send(());
    Ok(Json(serde_json::json!(record)))
}

/// POST /api/teams/:team/opponents/:opponent/scouting/analysis — model
/// commentary on the report. Not persisted; purely advisory.
pub async fn analyze_scouting(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let (config, brief) = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let o = callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
        let report = ScoutingReport::load(&root, &team, &opponent)?;
        Ok::<_, callsheet_core::CallsheetError>((config, brief_from_report(&o.name, &report)))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let client = ChatClient::new(
        &config.agent.base_url,
        &config.agent.model,
        &config.agent.api_key_env,
        config.agent.timeout_secs,
    )
    .map_err(AppError::agent)?;

    let messages = gameplan_agent::scouting_analysis_messages(&brief);
    let raw = client.complete(messages).await.map_err(AppError::agent)?;
    let result: Parsed<gameplan_agent::ScoutingAnalysis> = gameplan_agent::parse_model_json(&raw);

    Ok(Json(serde_json::json!(result)))
}
