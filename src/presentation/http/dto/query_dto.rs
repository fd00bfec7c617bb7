use serde::{Deserialize, Serialize};

use crate::application::services::RetrievedChunk;
use crate::application::use_cases::query_knowledge_base::QueryOutcome;

#[derive(Debug, Deserialize)]
pub struct QueryRequestDto {
    pub tenant_id: String,
    pub customer_id: String,
    pub query: String,
    pub max_results: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChunkResultDto {
    pub text: String,
    pub metadata: serde_json::Value,
    pub similarity_score: f32,
}

impl From<RetrievedChunk> for ChunkResultDto {
    fn from(chunk: RetrievedChunk) -> Self {
        Self {
            text: chunk.text,
            metadata: chunk.metadata,
            similarity_score: chunk.similarity_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryResponseDto {
    pub answer: String,
    pub results: Vec<ChunkResultDto>,
    pub sources_count: usize,
    pub confidence_scores: Vec<f32>,
}

impl From<QueryOutcome> for QueryResponseDto {
    fn from(outcome: QueryOutcome) -> Self {
        Self {
            answer: outcome.answer,
            results: outcome.results.into_iter().map(ChunkResultDto::from).collect(),
            sources_count: outcome.sources_count,
            confidence_scores: outcome.confidence_scores,
        }
    }
}
