use axum::extract::{Path, State};
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::playpool::{Play, PlayPool};
use callsheet_core::scouting::ScoutingReport;
use callsheet_core::types::PlayCategory;

fn play_json(play: &Play) -> serde_json::Value {
    serde_json::json!({
        "id": play.id,
        "category": play.category,
        "call": play.format_call(),
        "formation": play.formation,
        "concept": play.concept,
        "run_concept": play.run_concept,
        "front_beaters": play.front_beaters,
        "coverage_beaters": play.coverage_beaters,
        "blitz_beaters": play.blitz_beaters,
        "is_enabled": play.is_enabled,
        "is_locked": play.is_locked,
        "is_favorite": play.is_favorite,
        "customized_edit": play.customized_edit,
        "updated_at": play.updated_at,
    })
}

/// GET /api/teams/:team/opponents/:opponent/pool — the active view per
/// category (locked first, truncated at the cap), plus pool metadata.
pub async fn get_pool(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
        let pool = PlayPool::load(&root, &team, &opponent)?;
        let scouting_missing =
            ScoutingReport::try_load(&root, &team, &opponent)?.is_none();

        let categories: serde_json::Map<String, serde_json::Value> = PlayCategory::all()
            .iter()
            .map(|&cat| {
                let view: Vec<serde_json::Value> =
                    pool.active_view(cat).iter().map(|p| play_json(p)).collect();
                (cat.to_string(), serde_json::json!(view))
            })
            .collect();

        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "revision": pool.revision,
            "scouting_missing": scouting_missing,
            "total_plays": pool.plays.len(),
            "categories": categories,
            "updated_at": pool.updated_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct RegenerateBody {
    /// Per-category play counts; omitted categories keep their current rows.
    /// An empty map regenerates every category at its configured target.
    #[serde(default)]
    pub targets: BTreeMap<String, usize>,
    #[serde(default)]
    pub basis_revision: Option<u64>,
}

/// POST /api/teams/:team/opponents/:opponent/pool/regenerate — rebuild
/// unlocked rows from the master library against the scouting report.
pub async fn regenerate_pool(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
    Json(body): Json<RegenerateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut targets: BTreeMap<PlayCategory, usize> = BTreeMap::new();
    for (raw, n) in &body.targets {
        targets.insert(PlayCategory::from_str(raw)?, *n);
    }

    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;

        // Regeneration without a report would draw the run game blind.
        let report = ScoutingReport::load(&root, &team, &opponent)?;

        let targets = if targets.is_empty() {
            let session = callsheet_core::session::SessionContext::load(&root)?;
            session.effective_targets(&config.resolved_targets())
        } else {
            targets
        };

        let mut pool = PlayPool::load(&root, &team, &opponent)?;
        pool.check_revision(body.basis_revision)?;
        let master = PlayPool::load_master(&root, &config.template_team)?;

        let mut rng = StdRng::from_entropy();
        let summary =
            callsheet_core::selector::regenerate(&mut pool, &master, &report, &targets, &mut rng);
        pool.save(&root, &team, &opponent)?;

        tracing::info!(
            team = %team,
            opponent = %opponent,
            drawn = summary.total_drawn(),
            "play pool regenerated"
        );
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "revision": pool.revision,
            "fills": summary.fills,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct FlagBody {
    pub value: bool,
    #[serde(default)]
    pub basis_revision: Option<u64>,
}

async fn mutate_pool<F>(
    app: AppState,
    team: String,
    opponent: String,
    basis: Option<u64>,
    mutate: F,
) -> Result<Json<serde_json::Value>, AppError>
where
    F: FnOnce(&mut PlayPool) -> callsheet_core::Result<()> + Send + 'static,
{
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
        let mut pool = PlayPool::load(&root, &team, &opponent)?;
        pool.check_revision(basis)?;
        mutate(&mut pool)?;
        pool.save(&root, &team, &opponent)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({ "revision": pool.revision }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

/// POST /api/teams/:team/opponents/:opponent/pool/plays/:id/lock
pub async fn set_locked(
    State(app): State<AppState>,
    Path((team, opponent, id)): Path<(String, String, Uuid)>,
    Json(body): Json<FlagBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    mutate_pool(app, team, opponent, body.basis_revision, move |pool| {
        pool.set_locked(id, body.value)
    })
    .await
}

/// POST /api/teams/:team/opponents/:opponent/pool/plays/:id/enable
pub async fn set_enabled(
    State(app): State<AppState>,
    Path((team, opponent, id)): Path<(String, String, Uuid)>,
    Json(body): Json<FlagBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    mutate_pool(app, team, opponent, body.basis_revision, move |pool| {
        pool.set_enabled(id, body.value)
    })
    .await
}

/// POST /api/teams/:team/opponents/:opponent/pool/plays/:id/favorite
pub async fn set_favorite(
    State(app): State<AppState>,
    Path((team, opponent, id)): Path<(String, String, Uuid)>,
    Json(body): Json<FlagBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    mutate_pool(app, team, opponent, body.basis_revision, move |pool| {
        pool.set_favorite(id, body.value)
    })
    .await
}

#[derive(serde::Deserialize)]
pub struct EditCallBody {
    /// The coach's call string; null or blank clears the customization.
    #[serde(default)]
    pub call: Option<String>,
    #[serde(default)]
    pub basis_revision: Option<u64>,
}

/// PUT /api/teams/:team/opponents/:opponent/pool/plays/:id/call
pub async fn edit_call(
    State(app): State<AppState>,
    Path((team, opponent, id)): Path<(String, String, Uuid)>,
    Json(body): Json<EditCallBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    mutate_pool(app, team, opponent, body.basis_revision, move |pool| {
        pool.edit_call(id, body.call)
    })
    .await
}

/// DELETE /api/teams/:team/opponents/:opponent/pool/plays/:id
pub async fn remove_play(
    State(app): State<AppState>,
    Path((team, opponent, id)): Path<(String, String, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    mutate_pool(app, team, opponent, None, move |pool| {
        pool.remove(id).map(|_| ())
    })
    .await
}
