//! Content directory listing endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::FilesListResponse;

/// GET /files - List all files in the content directory
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FilesListResponse>> {
    let files = state.store().list().await?;
    let count = files.len();

    Ok(Json(FilesListResponse { files, count }))
}
