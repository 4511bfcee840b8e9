//! Vector index trait and the hosted Qdrant implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use crate::config::QdrantConfig;
use crate::error::{Error, Result};

/// One chunk ready for indexing
#[derive(Debug, Clone)]
pub struct ChunkPoint {
    /// Point ID in the index
    pub id: Uuid,
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Chunk text
    pub text: String,
    /// Stored filename the chunk came from
    pub source: String,
    /// Position of the chunk within its document
    pub chunk_index: u32,
}

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Chunk text
    pub text: String,
    /// Stored filename the chunk came from
    pub source: String,
    /// Similarity score, higher is more relevant
    pub score: f32,
}

/// Trait for vector storage and similarity search
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Make sure the backing collection exists
    async fn ensure_ready(&self) -> Result<()>;

    /// Insert or replace a batch of points
    async fn upsert(&self, points: Vec<ChunkPoint>) -> Result<()>;

    /// Return the `limit` most similar chunks to `vector`
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Hosted Qdrant client over its REST API
pub struct QdrantIndex {
    client: Client,
    config: QdrantConfig,
    /// Vector size for collection creation
    dimensions: usize,
}

#[derive(Serialize)]
struct UpsertRequest {
    points: Vec<PointStruct>,
}

#[derive(Serialize)]
struct PointStruct {
    id: String,
    vector: Vec<f32>,
    payload: serde_json::Value,
}

#[derive(Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    score: f32,
    #[serde(default)]
    payload: serde_json::Value,
}

impl QdrantIndex {
    /// Create a new index client
    pub fn new(config: &QdrantConfig, dimensions: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
            dimensions,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.url.trim_end_matches('/'), path);
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("api-key", key);
        }
        builder
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_ready(&self) -> Result<()> {
        let path = format!("/collections/{}", self.config.collection);
        let body = json!({
            "vectors": {
                "size": self.dimensions,
                "distance": "Cosine",
            }
        });

        let response = self
            .request(reqwest::Method::PUT, &path)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Collection create failed: {}", e)))?;

        // 409 means the collection already exists
        if response.status().is_success() || response.status() == reqwest::StatusCode::CONFLICT {
            return Ok(());
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if text.contains("already exists") {
            return Ok(());
        }

        Err(Error::vector_db(format!(
            "Collection create failed: HTTP {} - {}",
            status, text
        )))
    }

    async fn upsert(&self, points: Vec<ChunkPoint>) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let path = format!("/collections/{}/points?wait=true", self.config.collection);
        let request = UpsertRequest {
            points: points
                .into_iter()
                .map(|p| PointStruct {
                    id: p.id.to_string(),
                    vector: p.vector,
                    payload: json!({
                        "text": p.text,
                        "source": p.source,
                        "chunk_index": p.chunk_index,
                    }),
                })
                .collect(),
        };

        let response = self
            .request(reqwest::Method::PUT, &path)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Upsert failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Upsert failed: HTTP {} - {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>> {
        let path = format!("/collections/{}/points/search", self.config.collection);
        let request = SearchRequest {
            vector: vector.to_vec(),
            limit,
            with_payload: true,
        };

        let response = self
            .request(reqwest::Method::POST, &path)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Search failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Search failed: HTTP {} - {}",
                status, body
            )));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse search response: {}", e)))?;

        let chunks = search_response
            .result
            .into_iter()
            .map(|point| ScoredChunk {
                text: point.payload["text"].as_str().unwrap_or_default().to_string(),
                source: point.payload["source"].as_str().unwrap_or_default().to_string(),
                score: point.score,
            })
            .collect();

        Ok(chunks)
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parses() {
        let json = r#"{
            "result": [
                {"id": "1", "score": 0.92, "payload": {"text": "alpha", "source": "a.txt", "chunk_index": 0}},
                {"id": "2", "score": 0.55, "payload": {"text": "beta", "source": "b.pdf", "chunk_index": 3}}
            ],
            "status": "ok",
            "time": 0.001
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.result.len(), 2);
        assert_eq!(parsed.result[0].payload["text"], "alpha");
        assert!((parsed.result[0].score - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn test_upsert_request_shape() {
        let request = UpsertRequest {
            points: vec![PointStruct {
                id: "00000000-0000-0000-0000-000000000001".to_string(),
                vector: vec![0.5, 0.5],
                payload: json!({"text": "hello", "source": "a.txt", "chunk_index": 0}),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["points"][0]["payload"]["source"], "a.txt");
        assert_eq!(json["points"][0]["vector"][1], 0.5);
    }
}
