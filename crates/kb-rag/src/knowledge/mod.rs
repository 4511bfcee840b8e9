//! Knowledge base facade over the embedding provider and vector index

pub mod embedder;
pub mod qdrant;

pub use embedder::{Embedder, GeminiEmbedder};
pub use qdrant::{ChunkPoint, QdrantIndex, ScoredChunk, VectorIndex};

use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;

/// Owns the embedding client and vector index connection.
///
/// Exposes the two operations the rest of the system needs: submitting
/// chunk text for indexing and retrieving relevant chunks for a query.
#[derive(Clone)]
pub struct Knowledge {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl Knowledge {
    /// Create the facade from its providers
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Prepare the backing collection
    pub async fn init(&self) -> Result<()> {
        self.index.ensure_ready().await
    }

    /// Embed and index every chunk of one document as a single unit of work.
    ///
    /// Existing content is never consulted: each call re-indexes, so a
    /// re-uploaded file gets fresh points rather than being skipped.
    pub async fn add_content(&self, source: &str, chunks: &[String]) -> Result<usize> {
        let embeddings = self.embedder.embed_batch(chunks).await?;

        let points: Vec<ChunkPoint> = chunks
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, vector))| ChunkPoint {
                id: Uuid::new_v4(),
                vector,
                text: text.clone(),
                source: source.to_string(),
                chunk_index: i as u32,
            })
            .collect();

        let count = points.len();
        self.index.upsert(points).await?;

        tracing::info!("Indexed {} chunks from '{}'", count, source);
        Ok(count)
    }

    /// Retrieve the `top_k` chunks most relevant to `query`
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>> {
        let embedding = self.embedder.embed(query).await?;
        self.index.search(&embedding, top_k).await
    }
}
