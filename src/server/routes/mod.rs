//! API routes and handlers.

mod records;
mod scores;
mod submissions;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Submissions
        .route("/submissions", post(submissions::create_submission))
        // Records
        .route("/records", get(records::list_records))
        .route("/records/{id}", get(records::get_record))
        .route("/records/{id}/score", put(records::update_score))
        // Aggregates and reports
        .route("/players", get(scores::list_players))
        .route("/scores/total", get(scores::total_score))
        .route("/scores/players", get(scores::player_scores))
        .route("/report", post(scores::report));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
