pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (login/callback are public, me/logout carry a session)
    let auth_routes = Router::new()
        .route("/login", get(routes::auth::login))
        .route("/callback", get(routes::auth::callback))
        .route("/me", get(routes::auth::me))
        .route("/logout", post(routes::auth::logout));

    // Shift routes
    let shift_routes = Router::new()
        .route("/start", post(routes::shift::start))
        .route("/end", post(routes::shift::end))
        .route("/current", get(routes::shift::current))
        .route("/leaderboard", get(routes::shift::leaderboard));

    // Reminder routes
    let reminder_routes = Router::new()
        .route("/", get(routes::reminder::list))
        .route("/", post(routes::reminder::create))
        .route("/{reminder_id}", put(routes::reminder::update))
        .route("/{reminder_id}", delete(routes::reminder::delete))
        .route("/process", post(routes::reminder::process));

    // ERLC proxy routes
    let erlc_routes = Router::new()
        .route("/command", post(routes::erlc::command))
        .route("/players", get(routes::erlc::players))
        .route("/join-logs", get(routes::erlc::join_logs));

    // Announcement routes
    let announcement_routes = Router::new()
        .route("/", get(routes::announcement::list))
        .route("/", post(routes::announcement::create))
        .route("/{announcement_id}", delete(routes::announcement::delete));

    // Moderation log routes
    let log_routes = Router::new()
        .route("/", get(routes::moderation_log::list))
        .route("/", post(routes::moderation_log::create))
        .route("/{log_id}", delete(routes::moderation_log::delete));

    // Notification routes
    let notification_routes = Router::new().route("/check", post(routes::notification::check));

    // LOA routes
    let loa_routes = Router::new()
        .route("/", get(routes::loa::list))
        .route("/", post(routes::loa::create))
        .route("/{loa_id}", put(routes::loa::decide))
        .route("/{loa_id}", delete(routes::loa::delete));

    // Training claim routes
    let claim_routes = Router::new()
        .route("/", get(routes::training::list_claims))
        .route("/", post(routes::training::create_claim))
        .route("/{claim_id}", put(routes::training::decide_claim))
        .route("/{claim_id}", delete(routes::training::delete_claim));

    // Training session routes
    let session_routes = Router::new()
        .route("/", get(routes::training::list_sessions))
        .route("/", post(routes::training::create_session))
        .route("/{session_id}/start", post(routes::training::start_session))
        .route("/{session_id}/close", post(routes::training::close_session));

    // Compose API
    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/shift", shift_routes)
        .nest("/reminders", reminder_routes)
        .nest("/erlc", erlc_routes)
        .nest("/announcements", announcement_routes)
        .nest("/logs", log_routes)
        .nest("/notifications", notification_routes)
        .nest("/loa", loa_routes)
        .nest("/training/claims", claim_routes)
        .nest("/training/sessions", session_routes);

    // Health check
    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
