//! HTTP routes for the knowledge-base service

pub mod chat;
pub mod files;
pub mod upload;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::HealthResponse;

/// Build all routes
pub fn routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with a larger body limit for file uploads
        .route(
            "/upload",
            post(upload::upload_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Content directory
        .route("/files", get(files::list_files))
        // Question answering
        .route("/chat", post(chat::chat))
        // Health
        .route("/health", get(health_check))
}

/// GET /health - Service health and configuration summary
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let files_count = state.store().count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        api_key_set: !state.config().gemini.api_key.is_empty(),
        upload_dir: state.store().root().to_string_lossy().to_string(),
        files_count,
    }))
}
