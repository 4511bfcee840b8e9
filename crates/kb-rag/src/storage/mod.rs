//! Content directory storage for uploaded files

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::Result;
use crate::types::response::{format_size_kb, FileListEntry};

/// A file persisted to the content directory
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Unique name within the directory
    pub name: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Stores uploaded bytes under a content directory, resolving name
/// collisions with an incrementing numeric suffix.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store, creating the content directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Content directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `bytes` under a name derived from `original_name`.
    ///
    /// The first upload of `report.pdf` is stored as `report.pdf`, later
    /// ones as `report_1.pdf`, `report_2.pdf`, and so on. The exists-check
    /// and write are not atomic across concurrent requests, so two
    /// simultaneous uploads of the identical name can race; distinct names
    /// never collide.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        // Strip any path components from the client-supplied name
        let original_name = Path::new(original_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let (stem, extension) = split_name(&original_name);

        let mut candidate = original_name.clone();
        let mut counter = 1u32;
        while tokio::fs::try_exists(self.root.join(&candidate)).await? {
            candidate = match extension {
                Some(ext) => format!("{}_{}.{}", stem, counter, ext),
                None => format!("{}_{}", stem, counter),
            };
            counter += 1;
        }

        let path = self.root.join(&candidate);
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            // Don't leave a partial write behind for later collision scans
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e.into());
        }

        tracing::info!("Saved '{}' as '{}' ({} bytes)", original_name, candidate, bytes.len());

        Ok(StoredFile {
            name: candidate,
            path,
            size_bytes: bytes.len() as u64,
        })
    }

    /// List every file currently in the content directory
    pub async fn list(&self) -> Result<Vec<FileListEntry>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = dir.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);

            entries.push(FileListEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                size: format_size_kb(metadata.len()),
                modified,
            });
        }

        Ok(entries)
    }

    /// Number of files in the content directory
    pub async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}

/// Split a filename into stem and extension
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}
