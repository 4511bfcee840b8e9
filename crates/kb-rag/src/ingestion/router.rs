//! Extension-based routing to readers and chunking policies

use std::path::Path;

use crate::error::{Error, Result};

/// Reader categories for the supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    /// PDF documents
    Pdf,
    /// Plain text files
    PlainText,
    /// CSV tables
    Tabular,
    /// Word-processor documents (.doc, .docx)
    WordProcessor,
}

/// Fixed-size chunking parameters, keyed by file-type category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingPolicy {
    /// Chunk length in characters
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks
    pub overlap: usize,
}

impl ChunkingPolicy {
    /// Create a policy; overlap must be strictly less than chunk size
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(overlap < chunk_size, "overlap must be less than chunk_size");
        Self {
            chunk_size,
            overlap,
        }
    }
}

/// Reader and chunking selection for one file
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    pub kind: ReaderKind,
    pub chunking: ChunkingPolicy,
}

/// Map a file extension to its reader and chunking policy.
///
/// Matching is case-insensitive; a leading dot is accepted. Anything
/// outside the supported set is rejected.
pub fn route(extension: &str) -> Result<ReaderConfig> {
    let ext = extension.trim_start_matches('.').to_lowercase();

    let config = match ext.as_str() {
        "pdf" => ReaderConfig {
            kind: ReaderKind::Pdf,
            chunking: ChunkingPolicy::new(3000, 400),
        },
        "txt" => ReaderConfig {
            kind: ReaderKind::PlainText,
            chunking: ChunkingPolicy::new(1000, 200),
        },
        "csv" => ReaderConfig {
            kind: ReaderKind::Tabular,
            chunking: ChunkingPolicy::new(1000, 200),
        },
        "doc" | "docx" => ReaderConfig {
            kind: ReaderKind::WordProcessor,
            chunking: ChunkingPolicy::new(3000, 400),
        },
        _ => return Err(Error::UnsupportedFileType(format!(".{}", ext))),
    };

    Ok(config)
}

/// Route by a path's extension
pub fn route_path(path: &Path) -> Result<ReaderConfig> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    route(&ext)
}
