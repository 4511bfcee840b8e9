//! Application state for the HTTP server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::agent::{Agent, GeminiChat};
use crate::config::AppConfig;
use crate::error::Result;
use crate::knowledge::{GeminiEmbedder, Knowledge, QdrantIndex};
use crate::storage::FileStore;

/// Shared application state.
///
/// Every collaborator is constructed explicitly here and injected into the
/// request handlers; nothing is held in process-wide globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Content directory store
    store: FileStore,
    /// Knowledge base facade (embeddings + vector index)
    knowledge: Knowledge,
    /// Answering agent
    agent: Agent,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create application state with the production providers
    pub async fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store = FileStore::open(&config.storage.upload_dir).await?;
        tracing::info!("Content directory ready at {}", store.root().display());

        let embedder = Arc::new(GeminiEmbedder::new(&config.gemini));
        let index = Arc::new(QdrantIndex::new(&config.qdrant, config.gemini.dimensions));
        let knowledge = Knowledge::new(embedder, index);

        // The hosted index may be unreachable at boot; uploads will surface
        // the error per file instead of blocking startup
        if let Err(e) = knowledge.init().await {
            tracing::warn!("Vector collection not ready: {}", e);
        } else {
            tracing::info!("Vector collection '{}' ready", config.qdrant.collection);
        }

        let model = Arc::new(GeminiChat::new(&config.gemini));
        let agent = Agent::new(knowledge.clone(), model, config.agent.clone());

        Ok(Self::from_parts(config, store, knowledge, agent))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        config: AppConfig,
        store: FileStore,
        knowledge: Knowledge,
        agent: Agent,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                knowledge,
                agent,
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the file store
    pub fn store(&self) -> &FileStore {
        &self.inner.store
    }

    /// Get the knowledge base facade
    pub fn knowledge(&self) -> &Knowledge {
        &self.inner.knowledge
    }

    /// Get the answering agent
    pub fn agent(&self) -> &Agent {
        &self.inner.agent
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
