use axum::extract::State;
use axum::Json;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::session::SessionContext;
use callsheet_core::types::PlayCategory;

/// GET /api/session — current session context.
pub async fn get_session(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let session = SessionContext::load(&root)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!(session))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct PutSessionBody {
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub motion_pct: Option<f64>,
    #[serde(default)]
    pub targets: Option<BTreeMap<String, usize>>,
}

/// PUT /api/session — update the selected team/opponent and preferences.
/// Fields omitted from the body are left unchanged.
pub async fn put_session(
    State(app): State<AppState>,
    Json(body): Json<PutSessionBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(pct) = body.motion_pct {
        if !(0.0..=100.0).contains(&pct) {
            return Err(AppError::bad_request("motion_pct must be between 0 and 100"));
        }
    }
    let targets = match body.targets {
        Some(raw) => {
            let mut parsed: BTreeMap<PlayCategory, usize> = BTreeMap::new();
            for (key, n) in &raw {
                parsed.insert(PlayCategory::from_str(key)?, *n);
            }
            Some(parsed)
        }
        None => None,
    };

    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut session = SessionContext::load(&root)?;
        if let Some(team) = body.team {
            // The selected team must exist; clear by sending an empty string.
            if team.is_empty() {
                session.team = None;
                session.opponent = None;
            } else {
                callsheet_core::team::Team::load(&root, &team)?;
                session.team = Some(team);
            }
        }
        if let Some(opponent) = body.opponent {
            if opponent.is_empty() {
                session.opponent = None;
            } else {
                let team = session.team.clone().ok_or_else(|| {
                    callsheet_core::CallsheetError::TeamNotFound("(none selected)".into())
                })?;
                callsheet_core::opponent::Opponent::load(&root, &team, &opponent)?;
                session.opponent = Some(opponent);
            }
        }
        if let Some(pct) = body.motion_pct {
            session.motion_pct = pct;
        }
        if let Some(targets) = targets {
            session.targets = targets;
        }
        session.save(&root)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!(session))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}
