use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::opponent::Opponent;

/// GET /api/teams/:team/opponents — list a team's opponents.
pub async fn list_opponents(
    State(app): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let opponents = Opponent::list(&root, &team)?;
        let list: Vec<serde_json::Value> = opponents
            .iter()
            .map(|o| {
                let has_scouting = callsheet_core::paths::scouting_path(&root, &team, &o.slug)
                    .exists();
                serde_json::json!({
                    "slug": o.slug,
                    "name": o.name,
                    "has_scouting": has_scouting,
                    "updated_at": o.updated_at,
                })
            })
            .collect();
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateOpponentBody {
    pub slug: String,
    pub name: String,
}

/// POST /api/teams/:team/opponents — create an opponent.
pub async fn create_opponent(
    State(app): State<AppState>,
    Path(team): Path<String>,
    Json(body): Json<CreateOpponentBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let o = Opponent::create(&root, &team, body.slug, body.name)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "slug": o.slug,
            "name": o.name,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

/// GET /api/teams/:team/opponents/:opponent — opponent detail.
pub async fn get_opponent(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let o = Opponent::load(&root, &team, &opponent)?;
        let has_scouting = callsheet_core::paths::scouting_path(&root, &team, &opponent).exists();
        let has_gameplan = callsheet_core::paths::gameplan_path(&root, &team, &opponent).exists();
        let pool = callsheet_core::playpool::PlayPool::load(&root, &team, &opponent)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "slug": o.slug,
            "name": o.name,
            "has_scouting": has_scouting,
            "has_gameplan": has_gameplan,
            "pool_size": pool.plays.len(),
            "pool_revision": pool.revision,
            "created_at": o.created_at,
            "updated_at": o.updated_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/teams/:team/opponents/:opponent — remove the opponent and all
/// of its files (scouting, pool, game plan).
pub async fn delete_opponent(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        Opponent::delete(&root, &team, &opponent)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({ "deleted": opponent }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}
