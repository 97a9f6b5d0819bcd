use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use callsheet_core::error::CallsheetError;

// ---------------------------------------------------------------------------
// Internal sentinels for explicit statuses
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 409 through
/// the `anyhow::Error` chain without touching the `CallsheetError` enum.
#[derive(Debug)]
struct ConflictError(String);

impl std::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConflictError {}

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain without touching the `CallsheetError` enum.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

/// Private sentinel error type used to carry an explicit HTTP 400 through
/// the `anyhow::Error` chain without touching the `CallsheetError` enum.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

/// Sentinel for upstream LLM failures, mapped to 502 Bad Gateway.
#[derive(Debug)]
struct AgentFailure(String);

impl std::fmt::Display for AgentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for AgentFailure {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// Construct a 409 Conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self(ConflictError(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    /// Construct a 502 Bad Gateway error for upstream model failures.
    pub fn agent(err: gameplan_agent::AgentError) -> Self {
        Self(AgentFailure(err.to_string()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Check for explicit sentinel types before falling through.
        if let Some(c) = self.0.downcast_ref::<ConflictError>() {
            let body = serde_json::json!({ "error": c.0.clone() });
            return (StatusCode::CONFLICT, axum::Json(body)).into_response();
        }
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }
        if let Some(a) = self.0.downcast_ref::<AgentFailure>() {
            let body = serde_json::json!({ "error": a.0.clone() });
            return (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<CallsheetError>() {
            match e {
                CallsheetError::TeamNotFound(_)
                | CallsheetError::OpponentNotFound(_)
                | CallsheetError::ProfileNotFound(_)
                | CallsheetError::PlayNotFound(_) => StatusCode::NOT_FOUND,
                CallsheetError::TeamExists(_)
                | CallsheetError::OpponentExists(_)
                | CallsheetError::TemplateTeamProtected
                | CallsheetError::NoScoutingReport { .. }
                | CallsheetError::StaleRevision { .. } => StatusCode::CONFLICT,
                CallsheetError::NotInitialized
                | CallsheetError::InvalidSlug(_)
                | CallsheetError::InvalidCategory(_)
                | CallsheetError::UnknownConcept { .. } => StatusCode::BAD_REQUEST,
                CallsheetError::Journal(_)
                | CallsheetError::Io(_)
                | CallsheetError::Yaml(_)
                | CallsheetError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
