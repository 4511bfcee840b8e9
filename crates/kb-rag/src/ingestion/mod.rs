//! Document ingestion: type routing, text extraction, chunking, submission

pub mod chunker;
pub mod pipeline;
pub mod reader;
pub mod router;

pub use chunker::chunk_text;
pub use pipeline::IngestionPipeline;
pub use reader::ExtractedText;
pub use router::{ChunkingPolicy, ReaderConfig, ReaderKind};
