use std::sync::Arc;

use crate::application::services::{AnswerService, RetrievalService, RetrievedChunk};
use crate::application::tenant_registry::{TenantAccessError, TenantRegistry};
use crate::domain::value_objects::CustomerId;

const MIN_QUERY_CHARS: usize = 3;
const MAX_QUERY_CHARS: usize = 1000;

#[derive(Debug)]
pub enum QueryKnowledgeBaseError {
    ValidationError(String),
    UnknownTenant(String),
    RetrievalError(String),
    AnswerError(String),
}

impl std::fmt::Display for QueryKnowledgeBaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKnowledgeBaseError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            QueryKnowledgeBaseError::UnknownTenant(_) => write!(f, "Invalid tenant ID"),
            QueryKnowledgeBaseError::RetrievalError(msg) => write!(f, "Retrieval error: {}", msg),
            QueryKnowledgeBaseError::AnswerError(msg) => write!(f, "Answer error: {}", msg),
        }
    }
}

impl std::error::Error for QueryKnowledgeBaseError {}

impl From<TenantAccessError> for QueryKnowledgeBaseError {
    fn from(e: TenantAccessError) -> Self {
        match e {
            TenantAccessError::InvalidFormat(msg) => QueryKnowledgeBaseError::ValidationError(msg),
            TenantAccessError::Unregistered(tenant) => {
                QueryKnowledgeBaseError::UnknownTenant(tenant)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryKnowledgeBaseRequest {
    pub tenant_id: String,
    pub customer_id: String,
    pub query: String,
    pub max_results: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub answer: String,
    pub results: Vec<RetrievedChunk>,
    pub sources_count: usize,
    pub confidence_scores: Vec<f32>,
}

/// Embed the query, search the tenant's vectors, and phrase an answer from
/// whatever clears the similarity threshold.
pub struct QueryKnowledgeBaseUseCase {
    registry: Arc<TenantRegistry>,
    retrieval_service: Arc<RetrievalService>,
    answer_service: Arc<AnswerService>,
}

impl QueryKnowledgeBaseUseCase {
    pub fn new(
        registry: Arc<TenantRegistry>,
        retrieval_service: Arc<RetrievalService>,
        answer_service: Arc<AnswerService>,
    ) -> Self {
        Self {
            registry,
            retrieval_service,
            answer_service,
        }
    }

    pub async fn execute(
        &self,
        request: QueryKnowledgeBaseRequest,
    ) -> Result<QueryOutcome, QueryKnowledgeBaseError> {
        let tenant = self.registry.resolve(&request.tenant_id)?;
        CustomerId::new(&request.customer_id)
            .map_err(QueryKnowledgeBaseError::ValidationError)?;

        let query = request.query.trim();
        if query.len() < MIN_QUERY_CHARS {
            return Err(QueryKnowledgeBaseError::ValidationError(format!(
                "Query must be at least {} characters",
                MIN_QUERY_CHARS
            )));
        }
        if query.len() > MAX_QUERY_CHARS {
            return Err(QueryKnowledgeBaseError::ValidationError(format!(
                "Query too long (max {} characters)",
                MAX_QUERY_CHARS
            )));
        }

        let results = self
            .retrieval_service
            .retrieve(&tenant, query, request.max_results)
            .await
            .map_err(|e| QueryKnowledgeBaseError::RetrievalError(e.to_string()))?;

        let answer = self
            .answer_service
            .answer(query, &results)
            .await
            .map_err(|e| QueryKnowledgeBaseError::AnswerError(e.to_string()))?;

        let confidence_scores = results.iter().map(|r| r.similarity_score).collect();

        Ok(QueryOutcome {
            answer,
            sources_count: results.len(),
            confidence_scores,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;
    use uuid::Uuid;

    use crate::application::ports::{
        AnswerGenerator, AnswerGeneratorError, EmbeddingProvider, EmbeddingProviderError,
    };
    use crate::application::services::NO_ANSWER;
    use crate::domain::repositories::{
        ChunkMatch, VectorRecord, VectorRepository, VectorRepositoryError,
    };
    use crate::domain::value_objects::{DocumentKey, TenantId};

    struct FixedEmbeddings;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbeddings {
        async fn embed(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![0.0; 4]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| Vector::from(vec![0.0; 4])).collect())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    struct CannedMatches {
        matches: Vec<ChunkMatch>,
    }

    #[async_trait]
    impl VectorRepository for CannedMatches {
        async fn insert_batch(
            &self,
            _tenant: &TenantId,
            _records: &[VectorRecord],
        ) -> Result<usize, VectorRepositoryError> {
            Ok(0)
        }

        async fn delete_by_source(
            &self,
            _tenant: &TenantId,
            _document_key: &DocumentKey,
        ) -> Result<usize, VectorRepositoryError> {
            Ok(0)
        }

        async fn similarity_search(
            &self,
            _tenant: &TenantId,
            _query: &Vector,
            limit: i64,
        ) -> Result<Vec<ChunkMatch>, VectorRepositoryError> {
            Ok(self.matches.iter().take(limit as usize).cloned().collect())
        }

        async fn count(&self, _tenant: &TenantId) -> Result<i64, VectorRepositoryError> {
            Ok(self.matches.len() as i64)
        }
    }

    struct CannedAnswer;

    #[async_trait]
    impl AnswerGenerator for CannedAnswer {
        async fn generate_answer(&self, _prompt: &str) -> Result<String, AnswerGeneratorError> {
            Ok("Grounded answer.".to_string())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn use_case(matches: Vec<ChunkMatch>) -> QueryKnowledgeBaseUseCase {
        let retrieval = Arc::new(RetrievalService::new(
            Arc::new(FixedEmbeddings),
            Arc::new(CannedMatches { matches }),
            3,
            0.7,
        ));
        QueryKnowledgeBaseUseCase::new(
            Arc::new(TenantRegistry::new(vec![TenantId::new("acme").unwrap()])),
            retrieval,
            Arc::new(AnswerService::new(Arc::new(CannedAnswer))),
        )
    }

    fn hit(text: &str, similarity: f32) -> ChunkMatch {
        ChunkMatch {
            id: Uuid::new_v4(),
            chunk_text: text.to_string(),
            metadata: serde_json::json!({"source": "documents/raw/x.md"}),
            similarity,
        }
    }

    fn request(query: &str) -> QueryKnowledgeBaseRequest {
        QueryKnowledgeBaseRequest {
            tenant_id: "acme".to_string(),
            customer_id: "cust-001".to_string(),
            query: query.to_string(),
            max_results: None,
        }
    }

    #[tokio::test]
    async fn test_query_returns_answer_and_scores() {
        let use_case = use_case(vec![hit("SLA is 99.9%", 0.92), hit("support hours", 0.75)]);

        let outcome = use_case.execute(request("what is the SLA?")).await.unwrap();
        assert_eq!(outcome.answer, "Grounded answer.");
        assert_eq!(outcome.sources_count, 2);
        assert_eq!(outcome.confidence_scores, vec![0.92, 0.75]);
    }

    #[tokio::test]
    async fn test_no_matches_yields_fixed_answer() {
        let use_case = use_case(vec![hit("irrelevant", 0.2)]);

        let outcome = use_case.execute(request("what is the SLA?")).await.unwrap();
        assert_eq!(outcome.answer, NO_ANSWER);
        assert_eq!(outcome.sources_count, 0);
        assert!(outcome.confidence_scores.is_empty());
    }

    #[tokio::test]
    async fn test_query_length_bounds() {
        let use_case = use_case(Vec::new());

        let result = use_case.execute(request("hi")).await;
        assert!(matches!(
            result,
            Err(QueryKnowledgeBaseError::ValidationError(_))
        ));

        let result = use_case.execute(request(&"x".repeat(1001))).await;
        assert!(matches!(
            result,
            Err(QueryKnowledgeBaseError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_customer_id_is_rejected() {
        let use_case = use_case(Vec::new());

        let result = use_case
            .execute(QueryKnowledgeBaseRequest {
                tenant_id: "acme".to_string(),
                customer_id: "not a customer!".to_string(),
                query: "what is the SLA?".to_string(),
                max_results: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(QueryKnowledgeBaseError::ValidationError(_))
        ));
    }
}
