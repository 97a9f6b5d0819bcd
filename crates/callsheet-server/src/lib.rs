pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: std::path::PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Init / config
        .route("/api/init", post(routes::init::init_project))
        .route("/api/config", get(routes::init::get_config))
        // Teams
        .route("/api/teams", get(routes::teams::list_teams))
        .route("/api/teams", post(routes::teams::create_team))
        .route("/api/teams/{team}", get(routes::teams::get_team))
        .route("/api/teams/{team}", delete(routes::teams::delete_team))
        .route(
            "/api/teams/{team}/profiles",
            post(routes::teams::add_profile),
        )
        .route(
            "/api/teams/{team}/profiles/{email}",
            delete(routes::teams::remove_profile),
        )
        // Opponents
        .route(
            "/api/teams/{team}/opponents",
            get(routes::opponents::list_opponents),
        )
        .route(
            "/api/teams/{team}/opponents",
            post(routes::opponents::create_opponent),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}",
            get(routes::opponents::get_opponent),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}",
            delete(routes::opponents::delete_opponent),
        )
        // Scouting
        .route(
            "/api/teams/{team}/opponents/{opponent}/scouting",
            get(routes::scouting::get_scouting),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/scouting",
            put(routes::scouting::put_scouting),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/scouting/analysis",
            post(routes::gameplan::analyze_scouting),
        )
        // Terminology
        .route(
            "/api/terminology/template",
            get(routes::terminology::get_template_library),
        )
        .route(
            "/api/teams/{team}/terminology",
            get(routes::terminology::get_terminology),
        )
        .route(
            "/api/teams/{team}/terminology/restore",
            post(routes::terminology::restore_terminology),
        )
        .route(
            "/api/teams/{team}/terminology/{category}",
            get(routes::terminology::get_terminology_category),
        )
        .route(
            "/api/teams/{team}/terminology/{category}",
            put(routes::terminology::put_terminology_category),
        )
        // Play pool
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool",
            get(routes::playpool::get_pool),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool/regenerate",
            post(routes::playpool::regenerate_pool),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool/plays/{id}/lock",
            post(routes::playpool::set_locked),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool/plays/{id}/enable",
            post(routes::playpool::set_enabled),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool/plays/{id}/favorite",
            post(routes::playpool::set_favorite),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool/plays/{id}/call",
            put(routes::playpool::edit_call),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/pool/plays/{id}",
            delete(routes::playpool::remove_play),
        )
        // Game plan
        .route(
            "/api/teams/{team}/opponents/{opponent}/gameplan",
            get(routes::gameplan::get_gameplan),
        )
        .route(
            "/api/teams/{team}/opponents/{opponent}/gameplan/generate",
            post(routes::gameplan::generate_gameplan),
        )
        // Session
        .route("/api/session", get(routes::session::get_session))
        .route("/api/session", put(routes::session::put_session))
        // Help
        .route("/api/help/videos", get(routes::help::list_videos))
        // Journal
        .route("/api/journal", get(routes::journal::list_operations))
        .route(
            "/api/journal/unfinished",
            get(routes::journal::list_unfinished),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the callsheet API server.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let app = build_router(root);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("callsheet server listening on http://localhost:{port}");

    if open_browser {
        let url = format!("http://localhost:{port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("callsheet server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
