use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::value_objects::TenantId;

/// Filesystem-backed document store: one directory per tenant, document keys
/// mapped to relative paths beneath it.
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn object_path(&self, tenant: &TenantId, key: &str) -> PathBuf {
        self.base_path.join(tenant.as_str()).join(key)
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn put(
        &self,
        tenant: &TenantId,
        key: &str,
        bytes: &[u8],
    ) -> Result<(), DocumentStoreError> {
        let path = self.object_path(tenant, key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DocumentStoreError::IoError(e.to_string()))?;
        }

        fs::write(&path, bytes)
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))
    }

    async fn get(&self, tenant: &TenantId, key: &str) -> Result<Vec<u8>, DocumentStoreError> {
        let path = self.object_path(tenant, key);

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DocumentStoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(DocumentStoreError::IoError(e.to_string())),
        }
    }

    async fn exists(&self, tenant: &TenantId, key: &str) -> Result<bool, DocumentStoreError> {
        match fs::try_exists(self.object_path(tenant, key)).await {
            Ok(exists) => Ok(exists),
            Err(e) => Err(DocumentStoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (LocalDocumentStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("kb-store-test-{}", uuid::Uuid::new_v4()));
        (LocalDocumentStore::new(dir.clone()), dir)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let (store, dir) = store();
        let tenant = TenantId::new("acme").unwrap();

        store
            .put(&tenant, "documents/raw/a.md", b"hello kb")
            .await
            .unwrap();
        let bytes = store.get(&tenant, "documents/raw/a.md").await.unwrap();
        assert_eq!(bytes, b"hello kb");

        let _ = fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let (store, dir) = store();
        let tenant = TenantId::new("acme").unwrap();

        let result = store.get(&tenant, "documents/raw/missing.md").await;
        assert!(matches!(result, Err(DocumentStoreError::NotFound(_))));
        assert!(!store.exists(&tenant, "documents/raw/missing.md").await.unwrap());

        let _ = fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let (store, dir) = store();
        let acme = TenantId::new("acme").unwrap();
        let globex = TenantId::new("globex").unwrap();

        store
            .put(&acme, "documents/raw/shared-name.md", b"acme data")
            .await
            .unwrap();

        assert!(!store.exists(&globex, "documents/raw/shared-name.md").await.unwrap());

        let _ = fs::remove_dir_all(dir).await;
    }
}
