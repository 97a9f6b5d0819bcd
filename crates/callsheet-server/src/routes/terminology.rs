use axum::extract::{Path, State};
use axum::Json;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::journal::OpJournal;
use callsheet_core::terminology::{self, TermSet};
use callsheet_core::types::TermCategory;

fn parse_category(raw: &str) -> Result<TermCategory, AppError> {
    TermCategory::from_str(raw).map_err(AppError::from)
}

/// GET /api/terminology/template — the full template library, grouped by
/// category so pickers can render every available concept.
pub async fn get_template_library(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let set = TermSet::load(&root, &config.template_team)?;
        let grouped: serde_json::Map<String, serde_json::Value> = TermCategory::all()
            .iter()
            .map(|&cat| {
                (
                    cat.to_string(),
                    serde_json::json!(set.entries_for(cat)),
                )
            })
            .collect();
        Ok::<_, callsheet_core::CallsheetError>(serde_json::Value::Object(grouped))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/teams/:team/terminology — the team's effective vocabulary for
/// every category, falling back to the template where the team has none.
pub async fn get_terminology(
    State(app): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        callsheet_core::team::Team::load(&root, &team)?;
        let own = TermSet::load(&root, &team)?;
        let grouped: serde_json::Map<String, serde_json::Value> = TermCategory::all()
            .iter()
            .map(|&cat| {
                let entries =
                    terminology::resolved_for(&root, &config.template_team, &team, cat)?;
                Ok((cat.to_string(), serde_json::json!(entries)))
            })
            .collect::<callsheet_core::Result<_>>()?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "revision": own.revision,
            "categories": grouped,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/teams/:team/terminology/:category — one category, resolved.
pub async fn get_terminology_category(
    State(app): State<AppState>,
    Path((team, category)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = parse_category(&category)?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        callsheet_core::team::Team::load(&root, &team)?;
        let own = TermSet::load(&root, &team)?;
        let entries = terminology::resolved_for(&root, &config.template_team, &team, category)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "category": category.to_string(),
            "revision": own.revision,
            "entries": entries,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct PutTerminologyBody {
    /// Concept keys to keep, drawn from the template library.
    pub selected: Vec<String>,
    /// Label overrides keyed by concept.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
    /// The revision this edit was based on; omit for last-write-wins.
    #[serde(default)]
    pub basis_revision: Option<u64>,
}

/// PUT /api/teams/:team/terminology/:category — journaled overlay-and-replace.
pub async fn put_terminology_category(
    State(app): State<AppState>,
    Path((team, category)): Path<(String, String)>,
    Json(body): Json<PutTerminologyBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = parse_category(&category)?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let journal = OpJournal::open(&callsheet_core::paths::journal_path(&root))?;
        let set = terminology::save_category(
            &root,
            &config.template_team,
            &team,
            category,
            &body.selected,
            &body.overrides,
            body.basis_revision,
            &journal,
        )?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "category": category.to_string(),
            "revision": set.revision,
            "entries": set.entries_for(category),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

/// POST /api/teams/:team/terminology/restore — drop all customizations and
/// fall back to the template defaults.
pub async fn restore_terminology(
    State(app): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let journal = OpJournal::open(&callsheet_core::paths::journal_path(&root))?;
        terminology::restore(&root, &config.template_team, &team, &journal)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({ "restored": team }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}
