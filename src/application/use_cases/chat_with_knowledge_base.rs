use std::sync::Arc;

use crate::application::services::RetrievedChunk;
use crate::application::use_cases::query_knowledge_base::{
    QueryKnowledgeBaseError, QueryKnowledgeBaseRequest, QueryKnowledgeBaseUseCase,
};

/// Reply when the caller asked for a chat turn without knowledge-base
/// grounding.
pub const KB_DISABLED_NOTICE: &str =
    "I'm a knowledge base assistant. Please enable KB mode to get contextual answers.";

const DEFAULT_CUSTOMER: &str = "default";

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub tenant_id: String,
    pub message: String,
    pub use_kb: bool,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub source_documents: Vec<RetrievedChunk>,
    pub sources_count: usize,
    pub confidence_scores: Vec<f32>,
}

/// Chat is the knowledge-base query path wearing a conversational response
/// shape.
pub struct ChatUseCase {
    query_use_case: Arc<QueryKnowledgeBaseUseCase>,
}

impl ChatUseCase {
    pub fn new(query_use_case: Arc<QueryKnowledgeBaseUseCase>) -> Self {
        Self { query_use_case }
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatOutcome, QueryKnowledgeBaseError> {
        if !request.use_kb {
            return Ok(ChatOutcome {
                response: KB_DISABLED_NOTICE.to_string(),
                source_documents: Vec::new(),
                sources_count: 0,
                confidence_scores: Vec::new(),
            });
        }

        let outcome = self
            .query_use_case
            .execute(QueryKnowledgeBaseRequest {
                tenant_id: request.tenant_id,
                customer_id: request
                    .customer_id
                    .unwrap_or_else(|| DEFAULT_CUSTOMER.to_string()),
                query: request.message,
                max_results: None,
            })
            .await?;

        Ok(ChatOutcome {
            response: outcome.answer,
            source_documents: outcome.results,
            sources_count: outcome.sources_count,
            confidence_scores: outcome.confidence_scores,
        })
    }
}
