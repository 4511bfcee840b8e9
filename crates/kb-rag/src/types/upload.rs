//! Uploaded file tracking through the ingestion lifecycle

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lifecycle status of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Bytes persisted to the content directory
    Saved,
    /// Ingestion task running
    Processing,
    /// Every extracted chunk submitted to the knowledge base
    Processed,
    /// Rejected, or ingestion failed
    Error,
}

/// A file accepted by the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Filename as sent by the client
    pub original_name: String,
    /// Unique name within the content directory
    pub stored_name: String,
    /// Full path of the stored file
    pub stored_path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
    /// Current lifecycle status
    pub status: FileStatus,
    /// Human-readable status detail
    pub message: Option<String>,
    /// When the bytes were persisted
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl UploadedFile {
    /// Create a record for a freshly saved file
    pub fn saved(original_name: String, stored_name: String, stored_path: PathBuf, size_bytes: u64) -> Self {
        Self {
            original_name,
            stored_name,
            stored_path,
            size_bytes,
            status: FileStatus::Saved,
            message: None,
            uploaded_at: chrono::Utc::now(),
        }
    }
}

/// Outcome of one file's ingestion, produced once per uploaded file
#[derive(Debug, Clone)]
pub struct IngestionResult {
    /// The file, with its final status and message
    pub file: UploadedFile,
    /// Whether every chunk was submitted to the knowledge base
    pub success: bool,
    /// Failure reason, when `success` is false
    pub error: Option<String>,
}
