use axum::extract::{Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::journal::OpJournal;

#[derive(serde::Deserialize)]
pub struct JournalQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// GET /api/journal — recent multi-step operations, newest first.
pub async fn list_operations(
    State(app): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let journal = OpJournal::open(&callsheet_core::paths::journal_path(&root))?;
        let ops = journal.list_recent(query.limit)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!(ops))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/journal/unfinished — operations still running or failed,
/// surfaced so an operator can inspect partial writes.
pub async fn list_unfinished(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let journal = OpJournal::open(&callsheet_core::paths::journal_path(&root))?;
        let ops = journal.unfinished()?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!(ops))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
