//! Ingestion pipeline: route, extract, chunk, submit

use std::path::Path;

use futures_util::future::join_all;

use crate::error::{Error, Result};
use crate::knowledge::Knowledge;
use crate::types::{FileStatus, IngestionResult, UploadedFile};

use super::{chunker, reader, router};

/// Drives one stored file from bytes on disk to indexed chunks
#[derive(Clone)]
pub struct IngestionPipeline {
    knowledge: Knowledge,
}

impl IngestionPipeline {
    /// Create a pipeline over the knowledge base facade
    pub fn new(knowledge: Knowledge) -> Self {
        Self { knowledge }
    }

    /// Ingest a single stored file.
    ///
    /// Returns the number of chunks submitted. Fails on unsupported
    /// extension, unreadable content, or a rejected submission; chunks
    /// already pushed to the remote index are not rolled back.
    pub async fn ingest(&self, stored_path: &Path) -> Result<usize> {
        let config = router::route_path(stored_path)?;

        let filename = stored_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let data = tokio::fs::read(stored_path).await?;
        let extracted = reader::extract(config.kind, &filename, &data)?;

        if extracted.text.trim().is_empty() {
            return Err(Error::extraction(&filename, "no text content extracted"));
        }

        if let Some(pages) = extracted.pages {
            tracing::debug!("Extracted {} pages from '{}'", pages, filename);
        }

        let chunks = chunker::chunk_text(&extracted.text, &config.chunking);
        self.knowledge.add_content(&filename, &chunks).await
    }

    /// Ingest a batch of uploaded files, one task per file.
    ///
    /// Files are processed independently; a failure in one never aborts
    /// the others. Results come back in submission order, one per file.
    pub async fn ingest_batch(&self, files: Vec<UploadedFile>) -> Vec<IngestionResult> {
        let tasks: Vec<_> = files
            .into_iter()
            .map(|mut file| {
                let pipeline = self.clone();
                tokio::spawn(async move {
                    file.status = FileStatus::Processing;
                    tracing::info!("Adding to knowledge base: {}", file.stored_name);

                    match pipeline.ingest(&file.stored_path).await {
                        Ok(chunks) => {
                            file.status = FileStatus::Processed;
                            file.message =
                                Some("Successfully added to knowledge base".to_string());
                            tracing::info!(
                                "Processed '{}' ({} chunks)",
                                file.stored_name,
                                chunks
                            );
                            IngestionResult {
                                file,
                                success: true,
                                error: None,
                            }
                        }
                        Err(e) => {
                            let message = e.to_string();
                            tracing::error!(
                                "Failed to process '{}': {}",
                                file.stored_name,
                                message
                            );
                            file.status = FileStatus::Error;
                            file.message = Some(message.clone());
                            IngestionResult {
                                file,
                                success: false,
                                error: Some(message),
                            }
                        }
                    }
                })
            })
            .collect();

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|e| {
                    // A panicked task still has to produce its slot in the batch
                    let message = format!("ingestion task failed: {}", e);
                    let mut file = UploadedFile::saved(
                        String::new(),
                        String::new(),
                        Default::default(),
                        0,
                    );
                    file.status = FileStatus::Error;
                    file.message = Some(message.clone());
                    IngestionResult {
                        file,
                        success: false,
                        error: Some(message),
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::knowledge::stubs::{FixedEmbedder, RecordingIndex};

    fn pipeline_with_index(index: Arc<RecordingIndex>) -> IngestionPipeline {
        IngestionPipeline::new(Knowledge::new(Arc::new(FixedEmbedder), index))
    }

    async fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_ingest_txt_chunks_and_submits() {
        let dir = tempfile::tempdir().unwrap();
        // 1800 chars with policy 1000/200 -> ceil(1600/800) = 2 chunks
        let path = write_file(&dir, "big.txt", "x".repeat(1800).as_bytes()).await;

        let index = Arc::new(RecordingIndex::default());
        let pipeline = pipeline_with_index(index.clone());

        let count = pipeline.ingest(&path).await.unwrap();
        assert_eq!(count, 2);

        let points = index.points.lock();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].source, "big.txt");
        assert_eq!(points[0].text.len(), 1000);
    }

    #[tokio::test]
    async fn test_ingest_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "image.png", b"\x89PNG").await;

        let pipeline = pipeline_with_index(Arc::new(RecordingIndex::default()));
        let err = pipeline.ingest(&path).await.unwrap_err();
        assert!(err.to_string().starts_with("unsupported file type"));
    }

    #[tokio::test]
    async fn test_ingest_rejects_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "blank.txt", b"   \n  ").await;

        let pipeline = pipeline_with_index(Arc::new(RecordingIndex::default()));
        let err = pipeline.ingest(&path).await.unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_batch_isolates_failures_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.txt", b"some real content here").await;
        let bad = write_file(&dir, "bad.pdf", b"not a pdf at all").await;
        let good2 = write_file(&dir, "good2.txt", b"more real content").await;

        let files = vec![
            UploadedFile::saved("good.txt".into(), "good.txt".into(), good, 22),
            UploadedFile::saved("bad.pdf".into(), "bad.pdf".into(), bad, 16),
            UploadedFile::saved("good2.txt".into(), "good2.txt".into(), good2, 17),
        ];

        let index = Arc::new(RecordingIndex::default());
        let pipeline = pipeline_with_index(index.clone());

        let results = pipeline.ingest_batch(files).await;
        assert_eq!(results.len(), 3);

        assert!(results[0].success);
        assert_eq!(results[0].file.status, FileStatus::Processed);
        assert_eq!(results[0].file.stored_name, "good.txt");

        assert!(!results[1].success);
        assert_eq!(results[1].file.status, FileStatus::Error);
        assert!(results[1].error.is_some());

        assert!(results[2].success);
        assert_eq!(results[2].file.stored_name, "good2.txt");

        // only the two good files reached the index
        let sources: Vec<String> = index.points.lock().iter().map(|p| p.source.clone()).collect();
        assert!(sources.contains(&"good.txt".to_string()));
        assert!(sources.contains(&"good2.txt".to_string()));
        assert!(!sources.contains(&"bad.pdf".to_string()));
    }

    #[tokio::test]
    async fn test_batch_submission_failure_marks_file_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "doc.txt", b"content that extracts fine").await;

        let index = Arc::new(RecordingIndex {
            fail_upserts: true,
            ..Default::default()
        });
        let pipeline = pipeline_with_index(index);

        let results = pipeline
            .ingest_batch(vec![UploadedFile::saved(
                "doc.txt".into(),
                "doc.txt".into(),
                path,
                26,
            )])
            .await;

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].error.as_ref().unwrap().contains("index outage"));
    }
}
