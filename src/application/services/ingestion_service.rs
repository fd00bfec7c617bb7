use std::sync::Arc;

use crate::application::ports::{DocumentStore, EmbeddingProvider};
use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::{VectorRecord, VectorRepository};
use crate::domain::value_objects::{DocumentKey, TenantId};
use crate::infrastructure::external_services::RecursiveSplitter;

const MIN_CHUNK_CHARS: usize = 10;

#[derive(Debug)]
pub enum IngestionError {
    DocumentError(String),
    EmptyDocument(String),
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionError::DocumentError(msg) => write!(f, "Document error: {}", msg),
            IngestionError::EmptyDocument(key) => {
                write!(f, "Document produced no chunks: {}", key)
            }
            IngestionError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            IngestionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for IngestionError {}

/// The chunk → embed → store pipeline behind `/api/kb/sync`. The background
/// worker drives the stages so it can persist job progress between them.
pub struct IngestionService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_repository: Arc<dyn VectorRepository>,
    document_store: Arc<dyn DocumentStore>,
    splitter: RecursiveSplitter,
    max_chunk_chars: usize,
    embed_batch_size: usize,
}

impl IngestionService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_repository: Arc<dyn VectorRepository>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            embedding_provider,
            vector_repository,
            document_store,
            splitter: RecursiveSplitter::default(),
            max_chunk_chars: 2000,
            embed_batch_size: 10,
        }
    }

    pub fn with_chunk_limits(mut self, max_chunk_chars: usize, embed_batch_size: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars.max(MIN_CHUNK_CHARS);
        self.embed_batch_size = embed_batch_size.max(1);
        self
    }

    /// Load the raw document and decode it as UTF-8 text.
    pub async fn load_raw_text(
        &self,
        tenant: &TenantId,
        key: &DocumentKey,
    ) -> Result<String, IngestionError> {
        let bytes = self
            .document_store
            .get(tenant, key.as_str())
            .await
            .map_err(|e| IngestionError::DocumentError(e.to_string()))?;

        String::from_utf8(bytes)
            .map_err(|_| IngestionError::DocumentError(format!("{} is not valid UTF-8", key)))
    }

    /// Split the document text into embeddable chunks. Fragments below
    /// `MIN_CHUNK_CHARS` or without meaningful content are dropped.
    pub fn split_document(
        &self,
        tenant: &TenantId,
        key: &DocumentKey,
        content_type: &str,
        text: &str,
    ) -> Result<Vec<DocumentChunk>, IngestionError> {
        let mut chunks = Vec::new();

        for piece in self.splitter.split(text, self.max_chunk_chars) {
            if piece.trim().len() < MIN_CHUNK_CHARS {
                continue;
            }
            let chunk = DocumentChunk::new(
                tenant.clone(),
                key.clone(),
                chunks.len() as i32,
                piece,
                content_type.to_string(),
            );
            if chunk.has_meaningful_content() {
                chunks.push(chunk);
            }
        }

        if chunks.is_empty() {
            return Err(IngestionError::EmptyDocument(key.to_string()));
        }

        Ok(chunks)
    }

    /// Embed chunks in batches and pair each chunk with its vector.
    pub async fn embed_chunks(
        &self,
        chunks: &[DocumentChunk],
    ) -> Result<Vec<VectorRecord>, IngestionError> {
        let mut records = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(self.embed_batch_size) {
            let texts: Vec<String> = batch
                .iter()
                .map(|chunk| chunk.chunk_text().to_string())
                .collect();

            let vectors = self
                .embedding_provider
                .embed_batch(&texts)
                .await
                .map_err(|e| IngestionError::EmbeddingError(e.to_string()))?;

            if vectors.len() != batch.len() {
                return Err(IngestionError::EmbeddingError(format!(
                    "Expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }

            for (chunk, embedding) in batch.iter().zip(vectors) {
                records.push(VectorRecord {
                    id: chunk.id(),
                    embedding,
                    chunk_text: chunk.chunk_text().to_string(),
                    metadata: chunk.metadata(),
                });
            }
        }

        Ok(records)
    }

    /// Replace the tenant's vectors for this document: delete whatever a
    /// previous sync inserted, then write the new batch.
    pub async fn replace_vectors(
        &self,
        tenant: &TenantId,
        key: &DocumentKey,
        records: &[VectorRecord],
    ) -> Result<usize, IngestionError> {
        self.vector_repository
            .delete_by_source(tenant, key)
            .await
            .map_err(|e| IngestionError::RepositoryError(e.to_string()))?;

        self.vector_repository
            .insert_batch(tenant, records)
            .await
            .map_err(|e| IngestionError::RepositoryError(e.to_string()))
    }

    /// Persist the normalized text under `documents/processed/`.
    pub async fn write_processed(
        &self,
        tenant: &TenantId,
        key: &DocumentKey,
        text: &str,
    ) -> Result<(), IngestionError> {
        self.document_store
            .put(tenant, &key.processed_key(), text.as_bytes())
            .await
            .map_err(|e| IngestionError::DocumentError(e.to_string()))
    }
}
