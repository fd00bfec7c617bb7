use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::value_objects::{DocumentKey, TenantId};

#[derive(Debug)]
pub enum VectorRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for VectorRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            VectorRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for VectorRepositoryError {}

/// A chunk embedding ready for insertion into `kb_vectors_{tenant}`.
#[derive(Debug, Clone)]
pub struct VectorRecord {
    pub id: Uuid,
    pub embedding: Vector,
    pub chunk_text: String,
    pub metadata: serde_json::Value,
}

/// One similarity-search hit. `similarity` is `1 - cosine_distance`.
#[derive(Debug, Clone)]
pub struct ChunkMatch {
    pub id: Uuid,
    pub chunk_text: String,
    pub metadata: serde_json::Value,
    pub similarity: f32,
}

#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Insert a batch of chunk embeddings for a tenant.
    async fn insert_batch(
        &self,
        tenant: &TenantId,
        records: &[VectorRecord],
    ) -> Result<usize, VectorRepositoryError>;

    /// Remove every vector previously ingested for a document key, so a
    /// re-sync replaces instead of duplicating.
    async fn delete_by_source(
        &self,
        tenant: &TenantId,
        document_key: &DocumentKey,
    ) -> Result<usize, VectorRepositoryError>;

    /// Top-k cosine similarity search, ordered best match first.
    async fn similarity_search(
        &self,
        tenant: &TenantId,
        query: &Vector,
        limit: i64,
    ) -> Result<Vec<ChunkMatch>, VectorRepositoryError>;

    async fn count(&self, tenant: &TenantId) -> Result<i64, VectorRepositoryError>;
}
