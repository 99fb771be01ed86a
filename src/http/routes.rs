use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Transcription trigger
        .route(
            "/entries/:entry_id/transcribe",
            post(handlers::transcribe_entry),
        )
        // Queries
        .route("/entries/:entry_id", get(handlers::get_entry))
        .route("/trips", get(handlers::list_trips))
        .route("/trips/:trip_id/entries", get(handlers::trip_entries))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
