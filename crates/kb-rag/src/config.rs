//! Configuration for the knowledge-base service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Content directory configuration
    pub storage: StorageConfig,
    /// Hosted vector store configuration
    pub qdrant: QdrantConfig,
    /// Gemini API configuration (embeddings + generation)
    pub gemini: GeminiConfig,
    /// Answering agent configuration
    pub agent: AgentConfig,
    /// Telemetry export credentials
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads a `.env` file if one is present. Missing API keys are not an
    /// error at startup; `/health` reports their presence instead.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT value: {}", port)))?;
        }
        if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
            config.server.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            config.storage.upload_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.qdrant.url = url;
        }
        if let Ok(key) = std::env::var("QDRANT_API_KEY") {
            config.qdrant.api_key = Some(key);
        }
        if let Ok(collection) = std::env::var("QDRANT_COLLECTION") {
            config.qdrant.collection = collection;
        }
        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            config.gemini.api_key = key;
        }
        if let Ok(pk) = std::env::var("LANGFUSE_PUBLIC_KEY") {
            config.telemetry.langfuse_public_key = Some(pk);
        }
        if let Ok(sk) = std::env::var("LANGFUSE_SECRET_KEY") {
            config.telemetry.langfuse_secret_key = Some(sk);
        }
        if let Ok(endpoint) = std::env::var("LANGFUSE_OTLP_ENDPOINT") {
            config.telemetry.otlp_endpoint = endpoint;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Allowed CORS origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1111,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Content directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded files are persisted
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("tmp/library"),
        }
    }
}

/// Hosted Qdrant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// Base URL of the Qdrant instance
    pub url: String,
    /// API key for hosted instances
    pub api_key: Option<String>,
    /// Collection name
    pub collection: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".to_string(),
            api_key: None,
            collection: "KnowledgeBase".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions
    pub dimensions: usize,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            embed_model: "gemini-embedding-001".to_string(),
            dimensions: 3072,
            generate_model: "gemini-2.5-flash".to_string(),
            temperature: 0.3, // lower for more factual answers
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Answering agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of chunks to retrieve per question
    pub top_k: usize,
    /// Minimum similarity score for a chunk to count as relevant
    pub min_score: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.4,
        }
    }
}

/// Telemetry export credentials (consumed by an external OTLP exporter)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Langfuse public key
    pub langfuse_public_key: Option<String>,
    /// Langfuse secret key
    pub langfuse_secret_key: Option<String>,
    /// OTLP ingestion endpoint
    pub otlp_endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            langfuse_public_key: None,
            langfuse_secret_key: None,
            otlp_endpoint: "https://eu.cloud.langfuse.com/api/public/ingestion".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Basic-auth header value for the OTLP exporter, if both keys are set
    pub fn basic_auth(&self) -> Option<String> {
        use base64::Engine;

        match (&self.langfuse_public_key, &self.langfuse_secret_key) {
            (Some(pk), Some(sk)) if !pk.is_empty() && !sk.is_empty() => {
                let raw = format!("{}:{}", pk, sk);
                Some(base64::engine::general_purpose::STANDARD.encode(raw))
            }
            _ => None,
        }
    }
}
