use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::scouting::{DefensiveLook, ScoutingReport};

/// GET /api/teams/:team/opponents/:opponent/scouting — the report, or an
/// empty-state marker when none has been entered yet.
pub async fn get_scouting(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
        let report = ScoutingReport::try_load(&root, &team, &opponent)?;
        Ok::<_, callsheet_core::CallsheetError>(match report {
            Some(r) => serde_json::json!({
                "exists": true,
                "fronts": r.fronts,
                "coverages": r.coverages,
                "blitzes": r.blitzes,
                "blitz_pct": r.blitz_pct,
                "motion_pct": r.motion_pct,
                "notes": r.notes,
                "updated_at": r.updated_at,
            }),
            None => serde_json::json!({ "exists": false }),
        })
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct PutScoutingBody {
    #[serde(default)]
    pub fronts: Vec<DefensiveLook>,
    #[serde(default)]
    pub coverages: Vec<DefensiveLook>,
    #[serde(default)]
    pub blitzes: Vec<DefensiveLook>,
    #[serde(default)]
    pub blitz_pct: f64,
    #[serde(default)]
    pub motion_pct: f64,
    #[serde(default)]
    pub notes: String,
}

/// PUT /api/teams/:team/opponents/:opponent/scouting — full replace.
pub async fn put_scouting(
    State(app): State<AppState>,
    Path((team, opponent)): Path<(String, String)>,
    Json(body): Json<PutScoutingBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    for look in body
        .fronts
        .iter()
        .chain(&body.coverages)
        .chain(&body.blitzes)
    {
        if !(0.0..=100.0).contains(&look.usage_pct) {
            return Err(AppError::bad_request(format!(
                "usage_pct for '{}' must be between 0 and 100",
                look.name
            )));
        }
    }

    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
        let mut report = ScoutingReport::try_load(&root, &team, &opponent)?
            .unwrap_or_else(ScoutingReport::new);
        report.fronts = body.fronts;
        report.coverages = body.coverages;
        report.blitzes = body.blitzes;
        report.blitz_pct = body.blitz_pct;
        report.motion_pct = body.motion_pct;
        report.notes = body.notes;
        report.updated_at = chrono::Utc::now();
        report.save(&root, &team, &opponent)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "saved": true,
            "updated_at": report.updated_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}
