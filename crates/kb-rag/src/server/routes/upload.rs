//! File upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::path::Path;

use crate::error::{Error, Result};
use crate::ingestion::{router, IngestionPipeline};
use crate::server::state::AppState;
use crate::types::{FileReport, UploadResponse, UploadedFile};

/// A submitted file's place in the batch before ingestion runs
enum Slot {
    /// Rejected or failed before ingestion; report is final
    Done(FileReport),
    /// Saved to the content directory, awaiting ingestion
    Saved(UploadedFile),
}

/// POST /upload - Accept files and add them to the knowledge base.
///
/// Every submitted file gets an entry in the response, in submission
/// order, even when some of them fail. Only a malformed request body
/// fails the batch as a whole.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut slots: Vec<Slot> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Multipart(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            // Not a file field
            continue;
        };

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                slots.push(Slot::Done(FileReport::rejected(
                    filename,
                    format!("Failed to read file: {}", e),
                )));
                continue;
            }
        };

        tracing::info!("Received file: {} ({} bytes)", filename, data.len());

        let extension = Path::new(&filename)
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Err(e) = router::route(&extension) {
            slots.push(Slot::Done(FileReport::rejected(filename, e.to_string())));
            continue;
        }

        match state.store().save(&filename, &data).await {
            Ok(stored) => slots.push(Slot::Saved(UploadedFile::saved(
                filename,
                stored.name,
                stored.path,
                stored.size_bytes,
            ))),
            Err(e) => {
                tracing::error!("Failed to store '{}': {}", filename, e);
                slots.push(Slot::Done(FileReport::rejected(filename, e.to_string())));
            }
        }
    }

    // Run ingestion for the saved files concurrently, then merge the
    // results back into their submission-order positions
    let saved_positions: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| matches!(slot, Slot::Saved(_)).then_some(i))
        .collect();
    let saved_files: Vec<UploadedFile> = slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Saved(file) => Some(file.clone()),
            Slot::Done(_) => None,
        })
        .collect();

    let pipeline = IngestionPipeline::new(state.knowledge().clone());
    let results = pipeline.ingest_batch(saved_files).await;

    for (position, result) in saved_positions.into_iter().zip(results) {
        slots[position] = Slot::Done(FileReport::from(&result.file));
    }

    let files: Vec<FileReport> = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Done(report) => report,
            // ingest_batch returns one result per saved file, so every
            // Saved slot was overwritten above
            Slot::Saved(file) => FileReport::from(&file),
        })
        .collect();

    Ok(Json(UploadResponse::from_reports(files)))
}
