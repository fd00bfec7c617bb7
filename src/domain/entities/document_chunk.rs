use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{DocumentKey, TenantId};

/// One chunk of a source document, ready to be embedded and stored in the
/// tenant's vector table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    id: Uuid,
    tenant: TenantId,
    source_key: DocumentKey,
    chunk_index: i32,
    chunk_text: String,
    content_type: String,
    created_at: DateTime<Utc>,
}

impl DocumentChunk {
    pub fn new(
        tenant: TenantId,
        source_key: DocumentKey,
        chunk_index: i32,
        chunk_text: String,
        content_type: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant,
            source_key,
            chunk_index,
            chunk_text,
            content_type,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn source_key(&self) -> &DocumentKey {
        &self.source_key
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn word_count(&self) -> usize {
        self.chunk_text.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_text.trim().is_empty()
    }

    pub fn has_meaningful_content(&self) -> bool {
        !self.is_empty() && self.word_count() >= 3
    }

    /// Row metadata persisted next to the embedding. Re-syncs match on
    /// `source` when replacing a document's vectors.
    pub fn metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "source": self.source_key.as_str(),
            "tenant": self.tenant.as_str(),
            "chunk_index": self.chunk_index,
            "content_type": self.content_type,
            "ingested_at": self.created_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> DocumentChunk {
        DocumentChunk::new(
            TenantId::new("acme").unwrap(),
            DocumentKey::parse("documents/raw/20250610_120000_abcd1234_notes.md").unwrap(),
            0,
            text.to_string(),
            "text/markdown".to_string(),
        )
    }

    #[test]
    fn test_meaningful_content() {
        assert!(chunk("A sentence with enough words.").has_meaningful_content());
        assert!(!chunk("   ").has_meaningful_content());
        assert!(!chunk("two words").has_meaningful_content());
    }

    #[test]
    fn test_metadata_carries_source_and_index() {
        let c = chunk("Some chunk text for the store.");
        let metadata = c.metadata();
        assert_eq!(
            metadata["source"],
            "documents/raw/20250610_120000_abcd1234_notes.md"
        );
        assert_eq!(metadata["tenant"], "acme");
        assert_eq!(metadata["chunk_index"], 0);
        assert_eq!(metadata["content_type"], "text/markdown");
    }
}
