//! Wire-format response types for the HTTP endpoints

use serde::{Deserialize, Serialize};

use super::upload::{FileStatus, UploadedFile};

/// Per-file entry in the upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Filename as sent by the client
    pub original_filename: String,
    /// Name the file was stored under, when it was saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_filename: Option<String>,
    /// Path of the stored file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<String>,
    /// Size formatted as "N.NN KB"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Final status
    pub status: FileStatus,
    /// Status detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileReport {
    /// Report for a file rejected before it was stored
    pub fn rejected(original_filename: String, message: String) -> Self {
        Self {
            original_filename,
            saved_filename: None,
            saved_path: None,
            size: None,
            status: FileStatus::Error,
            message: Some(message),
        }
    }
}

impl From<&UploadedFile> for FileReport {
    fn from(file: &UploadedFile) -> Self {
        Self {
            original_filename: file.original_name.clone(),
            saved_filename: Some(file.stored_name.clone()),
            saved_path: Some(file.stored_path.to_string_lossy().to_string()),
            size: Some(format_size_kb(file.size_bytes)),
            status: file.status,
            message: file.message.clone(),
        }
    }
}

/// Response for `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Summary line, e.g. "Processed 2/3 files successfully"
    pub message: String,
    /// One entry per submitted file, in submission order
    pub files: Vec<FileReport>,
    /// Batch totals
    pub summary: UploadSummary,
}

/// Batch totals for an upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl UploadResponse {
    /// Assemble the response from the ordered per-file reports
    pub fn from_reports(files: Vec<FileReport>) -> Self {
        let total = files.len();
        let successful = files
            .iter()
            .filter(|f| f.status == FileStatus::Processed)
            .count();
        let failed = files
            .iter()
            .filter(|f| f.status == FileStatus::Error)
            .count();

        Self {
            message: format!("Processed {}/{} files successfully", successful, total),
            files,
            summary: UploadSummary {
                total,
                successful,
                failed,
            },
        }
    }
}

/// Entry in the `GET /files` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListEntry {
    /// Filename within the content directory
    pub name: String,
    /// Size formatted as "N.NN KB"
    pub size: String,
    /// Last-modified time as Unix seconds
    pub modified: f64,
}

/// Response for `GET /files`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesListResponse {
    pub files: Vec<FileListEntry>,
    pub count: usize,
}

/// Response for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_set: bool,
    pub upload_dir: String,
    pub files_count: usize,
}

/// Format a byte count the way the upload response reports sizes
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
