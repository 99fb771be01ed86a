use super::state::AppState;
use crate::error::{PipelineError, StoreError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /entries/:entry_id/transcribe
/// Run the transcription pipeline for one entry. The persisted entry is
/// the authoritative outcome; failure detail lives in the row, not here.
pub async fn transcribe_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    info!("Transcription requested for entry: {}", entry_id);

    match state.pipeline.run(entry_id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                status: "done".to_string(),
            }),
        )
            .into_response(),
        Err(PipelineError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Entry {} not found", entry_id),
            }),
        )
            .into_response(),
        Err(err @ (PipelineError::AlreadyProcessing | PipelineError::AlreadyDone)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Transcription failed for entry {}: {}", entry_id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Transcription failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /entries/:entry_id
pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.get_entry(entry_id).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Entry {} not found", entry_id),
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to load entry {}: {}", entry_id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /trips
pub async fn list_trips(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_trips().await {
        Ok(trips) => (StatusCode::OK, Json(trips)).into_response(),
        Err(err) => {
            error!("Failed to list trips: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /trips/:trip_id/entries
/// Entries for one trip, newest first.
pub async fn trip_entries(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(StoreError::NotFound) = state.store.get_trip(trip_id).await {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Trip {} not found", trip_id),
            }),
        )
            .into_response();
    }

    match state.store.entries_for_trip(trip_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => {
            error!("Failed to list entries for trip {}: {}", trip_id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
