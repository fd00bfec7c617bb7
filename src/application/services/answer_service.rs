use std::sync::Arc;

use crate::application::ports::AnswerGenerator;
use crate::application::services::retrieval_service::RetrievedChunk;

/// Fixed reply when retrieval finds nothing above the threshold.
pub const NO_ANSWER: &str =
    "I don't know. I couldn't find any relevant information in the knowledge base.";

/// How many retrieved chunks make it into the grounding prompt.
const CONTEXT_CHUNKS: usize = 3;

#[derive(Debug)]
pub enum AnswerError {
    GenerationError(String),
}

impl std::fmt::Display for AnswerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerError::GenerationError(msg) => write!(f, "Answer generation error: {}", msg),
        }
    }
}

impl std::error::Error for AnswerError {}

/// Phrases an answer from retrieved chunks, instructing the model to stay
/// inside the provided context.
pub struct AnswerService {
    generator: Arc<dyn AnswerGenerator>,
}

impl AnswerService {
    pub fn new(generator: Arc<dyn AnswerGenerator>) -> Self {
        Self { generator }
    }

    pub async fn answer(
        &self,
        question: &str,
        context: &[RetrievedChunk],
    ) -> Result<String, AnswerError> {
        if context.is_empty() {
            return Ok(NO_ANSWER.to_string());
        }

        let prompt = build_prompt(question, context);

        self.generator
            .generate_answer(&prompt)
            .await
            .map_err(|e| AnswerError::GenerationError(e.to_string()))
    }
}

fn build_prompt(question: &str, context: &[RetrievedChunk]) -> String {
    let context_text = context
        .iter()
        .take(CONTEXT_CHUNKS)
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Based on the following information from the knowledge base, please answer \
the user's question. If the information doesn't contain a clear answer, respond \
with \"I don't know.\"\n\n\
Context from knowledge base:\n{}\n\n\
User question: {}\n\n\
Please provide a helpful and accurate answer based only on the provided context. \
If you cannot answer based on the context, say \"I don't know.\"",
        context_text, question
    )
}
