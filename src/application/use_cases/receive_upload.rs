use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::DocumentStore;
use crate::application::tenant_registry::{TenantAccessError, TenantRegistry};
use crate::domain::value_objects::DocumentKey;
use crate::infrastructure::security::{SignatureError, UploadSigner};

#[derive(Debug)]
pub enum ReceiveUploadError {
    ValidationError(String),
    UnknownTenant(String),
    Expired,
    SignatureMismatch,
    StorageError(String),
}

impl std::fmt::Display for ReceiveUploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiveUploadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ReceiveUploadError::UnknownTenant(_) => write!(f, "Invalid tenant ID"),
            ReceiveUploadError::Expired => write!(f, "Upload URL has expired"),
            ReceiveUploadError::SignatureMismatch => write!(f, "Upload signature does not match"),
            ReceiveUploadError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ReceiveUploadError {}

impl From<TenantAccessError> for ReceiveUploadError {
    fn from(e: TenantAccessError) -> Self {
        match e {
            TenantAccessError::InvalidFormat(msg) => ReceiveUploadError::ValidationError(msg),
            TenantAccessError::Unregistered(tenant) => ReceiveUploadError::UnknownTenant(tenant),
        }
    }
}

#[derive(Debug)]
pub struct ReceiveUploadRequest {
    pub tenant_id: String,
    pub document_key: String,
    pub expires_at: i64,
    pub signature: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub document_key: String,
    pub size_bytes: usize,
}

/// Accepts the PUT that a previously issued upload URL points at. The
/// signature binds tenant, key, and expiry; only raw-document keys pass
/// `DocumentKey::parse`, so uploads cannot land outside `documents/raw/`.
pub struct ReceiveUploadUseCase {
    registry: Arc<TenantRegistry>,
    signer: Arc<UploadSigner>,
    document_store: Arc<dyn DocumentStore>,
}

impl ReceiveUploadUseCase {
    pub fn new(
        registry: Arc<TenantRegistry>,
        signer: Arc<UploadSigner>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            registry,
            signer,
            document_store,
        }
    }

    pub async fn execute(
        &self,
        request: ReceiveUploadRequest,
    ) -> Result<ReceivedUpload, ReceiveUploadError> {
        let tenant = self.registry.resolve(&request.tenant_id)?;
        let document_key = DocumentKey::parse(&request.document_key)
            .map_err(ReceiveUploadError::ValidationError)?;

        self.signer
            .verify(
                &tenant,
                document_key.as_str(),
                request.expires_at,
                &request.signature,
                Utc::now(),
            )
            .map_err(|e| match e {
                SignatureError::Expired => ReceiveUploadError::Expired,
                SignatureError::Mismatch => ReceiveUploadError::SignatureMismatch,
            })?;

        if request.bytes.is_empty() {
            return Err(ReceiveUploadError::ValidationError(
                "Upload body is empty".to_string(),
            ));
        }

        self.document_store
            .put(&tenant, document_key.as_str(), &request.bytes)
            .await
            .map_err(|e| ReceiveUploadError::StorageError(e.to_string()))?;

        Ok(ReceivedUpload {
            document_key: document_key.as_str().to_string(),
            size_bytes: request.bytes.len(),
        })
    }
}
