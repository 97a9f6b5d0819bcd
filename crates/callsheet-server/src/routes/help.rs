use axum::extract::{Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct HelpQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// GET /api/help/videos — the help video registry, optionally filtered by
/// category.
pub async fn list_videos(
    State(app): State<AppState>,
    Query(query): Query<HelpQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut videos = callsheet_core::help::list(&root)?;
        if let Some(category) = query.category {
            videos.retain(|v| v.category == category);
        }
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!(videos))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
