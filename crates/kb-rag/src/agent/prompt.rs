//! Prompt templates for grounded answering

use crate::knowledge::ScoredChunk;

use super::NO_ANSWER;

/// Prompt builder for the answering agent
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block from retrieved chunks
    pub fn build_context(chunks: &[ScoredChunk]) -> String {
        let mut context = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            context.push_str(&format!(
                "[{}] Source: {}\n\n{}\n\n---\n\n",
                i + 1,
                chunk.source,
                chunk.text
            ));
        }

        context
    }

    /// Build the full grounded-answering prompt
    pub fn build_grounded_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are a knowledge-base assistant. You answer questions using ONLY the document excerpts below.

RULES:
1. Use only information stated in the excerpts. Never use your own knowledge.
2. If the excerpts do not contain enough information to answer, reply with exactly: {sentinel}
3. Do not guess, infer beyond the excerpts, or fabricate content.

DOCUMENT EXCERPTS:
{context}

QUESTION: {question}

ANSWER:"#,
            sentinel = NO_ANSWER,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_numbers_sources() {
        let chunks = vec![
            ScoredChunk {
                text: "alpha".to_string(),
                source: "a.txt".to_string(),
                score: 0.9,
            },
            ScoredChunk {
                text: "beta".to_string(),
                source: "b.pdf".to_string(),
                score: 0.8,
            },
        ];

        let context = PromptBuilder::build_context(&chunks);
        assert!(context.contains("[1] Source: a.txt"));
        assert!(context.contains("[2] Source: b.pdf"));
        assert!(context.contains("alpha"));
    }

    #[test]
    fn test_prompt_carries_sentinel_and_question() {
        let prompt = PromptBuilder::build_grounded_prompt("What is X?", "[1] Source: a.txt\n\nX is Y");
        assert!(prompt.contains(NO_ANSWER));
        assert!(prompt.contains("QUESTION: What is X?"));
        assert!(prompt.contains("X is Y"));
    }
}
