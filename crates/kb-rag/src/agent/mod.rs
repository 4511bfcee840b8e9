//! Answering agent: retrieval-grounded question answering

pub mod gemini;
pub mod prompt;

pub use gemini::{ChatModel, GeminiChat};
pub use prompt::PromptBuilder;

use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::knowledge::{Knowledge, ScoredChunk};

/// Reply when no relevant indexed content exists for a question
pub const NO_ANSWER: &str = "I don't know";

/// Answers questions strictly from content indexed in the knowledge base.
///
/// When retrieval yields nothing sufficiently relevant the agent replies
/// with [`NO_ANSWER`] and never calls the generation model.
pub struct Agent {
    knowledge: Knowledge,
    model: Arc<dyn ChatModel>,
    config: AgentConfig,
}

impl Agent {
    /// Create an agent over the knowledge base and generation model
    pub fn new(knowledge: Knowledge, model: Arc<dyn ChatModel>, config: AgentConfig) -> Self {
        Self {
            knowledge,
            model,
            config,
        }
    }

    /// Answer a question with a single complete response
    pub async fn answer(&self, question: &str) -> Result<String> {
        match self.relevant_chunks(question).await? {
            None => Ok(NO_ANSWER.to_string()),
            Some(chunks) => {
                let context = PromptBuilder::build_context(&chunks);
                let prompt = PromptBuilder::build_grounded_prompt(question, &context);
                self.model.generate(&prompt).await
            }
        }
    }

    /// Answer a question as an incremental stream of text pieces
    pub async fn answer_stream(&self, question: &str) -> Result<BoxStream<'static, Result<String>>> {
        match self.relevant_chunks(question).await? {
            None => Ok(futures_util::stream::once(async { Ok(NO_ANSWER.to_string()) }).boxed()),
            Some(chunks) => {
                let context = PromptBuilder::build_context(&chunks);
                let prompt = PromptBuilder::build_grounded_prompt(question, &context);
                self.model.generate_stream(&prompt).await
            }
        }
    }

    /// Retrieve chunks and drop everything below the relevance threshold
    async fn relevant_chunks(&self, question: &str) -> Result<Option<Vec<ScoredChunk>>> {
        let mut chunks = self.knowledge.retrieve(question, self.config.top_k).await?;
        chunks.retain(|c| c.score >= self.config.min_score);

        if chunks.is_empty() {
            tracing::info!("No relevant chunks for question, answering with sentinel");
            Ok(None)
        } else {
            tracing::info!("Retrieved {} relevant chunks", chunks.len());
            Ok(Some(chunks))
        }
    }
}
