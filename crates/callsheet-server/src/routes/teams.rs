use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use callsheet_core::journal::OpJournal;
use callsheet_core::team::{Profile, Team};

/// GET /api/teams — list all teams.
pub async fn list_teams(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let teams = Team::list(&root)?;
        let list: Vec<serde_json::Value> = teams
            .iter()
            .map(|t| {
                serde_json::json!({
                    "slug": t.slug,
                    "name": t.name,
                    "is_template": t.slug == config.template_team,
                    "profiles": t.profiles.len(),
                    "updated_at": t.updated_at,
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
pub struct CreateTeamBody {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub coach_email: Option<String>,
    #[serde(default)]
    pub coach_name: Option<String>,
}

/// POST /api/teams — create a team, optionally with a first coach profile.
pub async fn create_team(
    State(app): State<AppState>,
    Json(body): Json<CreateTeamBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let coach = match (body.coach_email, body.coach_name) {
            (Some(email), Some(name)) => Some(Profile::new(email, name)),
            (Some(email), None) => Some(Profile::new(email.clone(), email)),
            _ => None,
        };
        let team = Team::create(&root, body.slug, body.name, coach)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "slug": team.slug,
            "name": team.name,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

/// GET /api/teams/:team — full team detail.
pub async fn get_team(
    State(app): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let t = Team::load(&root, &team)?;
        let opponents = callsheet_core::opponent::Opponent::list(&root, &team)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "slug": t.slug,
            "name": t.name,
            "profiles": t.profiles,
            "opponents": opponents.iter().map(|o| &o.slug).collect::<Vec<_>>(),
            "created_at": t.created_at,
            "updated_at": t.updated_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/teams/:team — journaled cascade delete.
pub async fn delete_team(
    State(app): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        if team == config.template_team {
            return Err(callsheet_core::CallsheetError::TemplateTeamProtected);
        }
        let journal = OpJournal::open(&callsheet_core::paths::journal_path(&root))?;
        callsheet_core::team::delete_cascade(&root, &team, &journal)?;
        Ok(serde_json::json!({ "deleted": team }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct AddProfileBody {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// POST /api/teams/:team/profiles — add or replace a coach profile.
pub async fn add_profile(
    State(app): State<AppState>,
    Path(team): Path<String>,
    Json(body): Json<AddProfileBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut t = Team::load(&root, &team)?;
        let mut profile = Profile::new(body.email, body.name);
        if let Some(role) = body.role {
            profile.role = role;
        }
        t.add_profile(profile);
        t.save(&root)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "slug": t.slug,
            "profiles": t.profiles,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}

/// DELETE /api/teams/:team/profiles/:email — remove a profile. When the last
/// profile goes, the team itself is cascade-deleted.
pub async fn remove_profile(
    State(app): State<AppState>,
    Path((team, email)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = callsheet_core::config::Config::load(&root)?;
        let mut t = Team::load(&root, &team)?;
        let remaining = t.remove_profile(&email)?;
        if remaining == 0 {
            // The cascade must never take the template team down with it.
            if team == config.template_team {
                return Err(callsheet_core::CallsheetError::TemplateTeamProtected);
            }
            let journal = OpJournal::open(&callsheet_core::paths::journal_path(&root))?;
            callsheet_core::team::delete_cascade(&root, &team, &journal)?;
            return Ok(serde_json::json!({
                "slug": team,
                "remaining_profiles": 0,
                "team_deleted": true,
            }));
        }
        t.save(&root)?;
        Ok::<_, callsheet_core::CallsheetError>(serde_json::json!({
            "slug": t.slug,
            "remaining_profiles": remaining,
            "team_deleted": false,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let _ = app.event_tx.send(());
    Ok(Json(result))
}
