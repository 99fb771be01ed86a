//! HTTP API server
//!
//! This module provides the REST surface of the service:
//! - POST /entries/:entry_id/transcribe - Run the transcription pipeline
//! - GET /entries/:entry_id - Fetch one entry
//! - GET /trips - List trips
//! - GET /trips/:trip_id/entries - List a trip's entries
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
