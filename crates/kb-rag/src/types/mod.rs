//! Core types for the knowledge-base service

pub mod query;
pub mod response;
pub mod upload;

pub use query::ChatRequest;
pub use response::{FileReport, FilesListResponse, HealthResponse, UploadResponse, UploadSummary};
pub use upload::{FileStatus, IngestionResult, UploadedFile};
