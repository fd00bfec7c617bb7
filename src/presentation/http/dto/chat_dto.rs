use serde::{Deserialize, Serialize};

use crate::application::use_cases::chat_with_knowledge_base::ChatOutcome;
use crate::presentation::http::dto::query_dto::ChunkResultDto;

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub tenant_id: String,
    pub message: String,
    #[serde(default = "default_use_kb")]
    pub use_kb: bool,
    pub customer_id: Option<String>,
}

fn default_use_kb() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub response: String,
    pub source_documents: Vec<ChunkResultDto>,
    pub sources_count: usize,
    pub confidence_scores: Vec<f32>,
}

impl From<ChatOutcome> for ChatResponseDto {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            response: outcome.response,
            source_documents: outcome
                .source_documents
                .into_iter()
                .map(ChunkResultDto::from)
                .collect(),
            sources_count: outcome.sources_count,
            confidence_scores: outcome.confidence_scores,
        }
    }
}
