//! kb-rag: knowledge-base service with document ingestion and grounded Q&A
//!
//! Clients upload PDF/DOCX/TXT/CSV documents over HTTP; the service stores
//! them in a content directory, extracts and chunks their text, indexes the
//! chunks in a hosted Qdrant collection via Gemini embeddings, and answers
//! questions strictly from the indexed content.

pub mod agent;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod knowledge;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod types;

pub use agent::{Agent, NO_ANSWER};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use ingestion::{ChunkingPolicy, IngestionPipeline, ReaderKind};
pub use knowledge::Knowledge;
pub use storage::FileStore;
