use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct InitBody {
    pub project: String,
}

/// POST /api/init — initialize the data root and seed template data.
pub async fn init_project(
    State(app): State<AppState>,
    Json(body): Json<InitBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::workspace::init(&root, &body.project)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "project": config.project,
            "template_team": config.template_team,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

/// GET /api/config — resolved configuration with validation warnings.
pub async fn get_config(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let warnings = config.validate();
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "project": config.project,
            "template_team": config.template_team,
            "targets": config.resolved_targets(),
            "agent": {
                "base_url": config.agent.base_url,
                "model": config.agent.model,
                "timeout_secs": config.agent.timeout_secs,
                "api_key_env": config.agent.api_key_env,
            },
            "warnings": warnings,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
