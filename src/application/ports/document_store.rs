use async_trait::async_trait;

use crate::domain::value_objects::TenantId;

#[derive(Debug)]
pub enum DocumentStoreError {
    NotFound(String),
    IoError(String),
}

impl std::fmt::Display for DocumentStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStoreError::NotFound(key) => write!(f, "Document not found: {}", key),
            DocumentStoreError::IoError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentStoreError {}

/// Per-tenant object store. Keys follow the `documents/raw/` and
/// `documents/processed/` layout; the store itself treats them as opaque
/// relative paths.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(
        &self,
        tenant: &TenantId,
        key: &str,
        bytes: &[u8],
    ) -> Result<(), DocumentStoreError>;

    async fn get(&self, tenant: &TenantId, key: &str) -> Result<Vec<u8>, DocumentStoreError>;

    async fn exists(&self, tenant: &TenantId, key: &str) -> Result<bool, DocumentStoreError>;
}
