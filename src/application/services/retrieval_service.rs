use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::ports::EmbeddingProvider;
use crate::domain::repositories::VectorRepository;
use crate::domain::value_objects::TenantId;

pub const MAX_TOP_K: i64 = 20;

#[derive(Debug)]
pub enum RetrievalError {
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            RetrievalError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// A chunk returned to the caller, already filtered by the similarity
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub text: String,
    pub metadata: serde_json::Value,
    pub similarity_score: f32,
}

/// Embeds the query and runs the per-tenant cosine similarity search.
pub struct RetrievalService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_repository: Arc<dyn VectorRepository>,
    default_top_k: i64,
    similarity_threshold: f32,
}

impl RetrievalService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_repository: Arc<dyn VectorRepository>,
        default_top_k: i64,
        similarity_threshold: f32,
    ) -> Self {
        Self {
            embedding_provider,
            vector_repository,
            default_top_k,
            similarity_threshold,
        }
    }

    pub async fn retrieve(
        &self,
        tenant: &TenantId,
        query: &str,
        top_k: Option<i64>,
    ) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        let limit = top_k.unwrap_or(self.default_top_k).clamp(1, MAX_TOP_K);

        let query_vector = self
            .embedding_provider
            .embed(query)
            .await
            .map_err(|e| RetrievalError::EmbeddingError(e.to_string()))?;

        let matches = self
            .vector_repository
            .similarity_search(tenant, &query_vector, limit)
            .await
            .map_err(|e| RetrievalError::RepositoryError(e.to_string()))?;

        let results = matches
            .into_iter()
            .filter(|m| m.similarity >= self.similarity_threshold)
            .map(|m| RetrievedChunk {
                text: m.chunk_text,
                metadata: m.metadata,
                similarity_score: m.similarity,
            })
            .collect();

        Ok(results)
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;
    use uuid::Uuid;

    use crate::application::ports::EmbeddingProviderError;
    use crate::domain::repositories::{
        ChunkMatch, VectorRecord, VectorRepositoryError,
    };
    use crate::domain::value_objects::DocumentKey;

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
            Ok(self
                .matches
                .iter()
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn count(&self, _tenant: &TenantId) -> Result<i64, VectorRepositoryError> {
            Ok(self.matches.len() as i64)
        }
    }

    fn hit(text: &str, similarity: f32) -> ChunkMatch {
        ChunkMatch {
            id: Uuid::new_v4(),
            chunk_text: text.to_string(),
            metadata: serde_json::json!({"source": "documents/raw/x"}),
            similarity,
        }
    }

    fn service(matches: Vec<ChunkMatch>) -> RetrievalService {
        RetrievalService::new(
            Arc::new(FixedEmbeddings),
            Arc::new(CannedMatches { matches }),
            3,
            0.7,
        )
    }

    #[tokio::test]
    async fn test_threshold_filters_weak_matches() {
        let service = service(vec![hit("strong", 0.91), hit("ok", 0.72), hit("weak", 0.41)]);
        let tenant = TenantId::new("acme").unwrap();

        let results = service.retrieve(&tenant, "what is acme", None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "strong");
        assert_eq!(results[1].similarity_score, 0.72);
    }

    #[tokio::test]
    async fn test_top_k_is_clamped() {
        let matches: Vec<ChunkMatch> = (0..30).map(|i| hit(&format!("m{}", i), 0.9)).collect();
        let service = service(matches);
        let tenant = TenantId::new("acme").unwrap();

        let results = service
            .retrieve(&tenant, "query", Some(500))
            .await
            .unwrap();
        assert_eq!(results.len(), MAX_TOP_K as usize);

        let results = service.retrieve(&tenant, "query", Some(0)).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_results() {
        let service = service(Vec::new());
        let tenant = TenantId::new("acme").unwrap();

        let results = service.retrieve(&tenant, "query", None).await.unwrap();
        assert!(results.is_empty());
    }
}
