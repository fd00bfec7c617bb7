use std::sync::Arc;

use chrono::Utc;

use crate::application::tenant_registry::{TenantAccessError, TenantRegistry};
use crate::domain::value_objects::DocumentKey;
use crate::infrastructure::security::UploadSigner;

#[derive(Debug)]
pub enum CreateUploadUrlError {
    ValidationError(String),
    UnknownTenant(String),
}

impl std::fmt::Display for CreateUploadUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateUploadUrlError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateUploadUrlError::UnknownTenant(_) => write!(f, "Invalid tenant ID"),
        }
    }
}

impl std::error::Error for CreateUploadUrlError {}

impl From<TenantAccessError> for CreateUploadUrlError {
    fn from(e: TenantAccessError) -> Self {
        match e {
            TenantAccessError::InvalidFormat(msg) => CreateUploadUrlError::ValidationError(msg),
            TenantAccessError::Unregistered(tenant) => CreateUploadUrlError::UnknownTenant(tenant),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUploadUrlRequest {
    pub tenant_id: String,
    pub filename: String,
}

/// A signed, expiring upload slot.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    pub url: String,
    pub document_key: String,
    pub expires_in: i64,
}

pub struct CreateUploadUrlUseCase {
    registry: Arc<TenantRegistry>,
    signer: Arc<UploadSigner>,
    public_base_url: String,
    url_ttl_secs: i64,
}

impl CreateUploadUrlUseCase {
    pub fn new(
        registry: Arc<TenantRegistry>,
        signer: Arc<UploadSigner>,
        public_base_url: String,
        url_ttl_secs: i64,
    ) -> Self {
        Self {
            registry,
            signer,
            public_base_url,
            url_ttl_secs,
        }
    }

    pub fn execute(&self, request: CreateUploadUrlRequest) -> Result<UploadSlot, CreateUploadUrlError> {
        let tenant = self.registry.resolve(&request.tenant_id)?;

        if request.filename.trim().is_empty() {
            return Err(CreateUploadUrlError::ValidationError(
                "filename is required".to_string(),
            ));
        }

        let now = Utc::now();
        let document_key = DocumentKey::new_raw(&request.filename, now);
        let expires_at = now.timestamp() + self.url_ttl_secs;
        let signature = self.signer.sign(&tenant, document_key.as_str(), expires_at);

        let url = format!(
            "{}/api/upload/{}?tenant_id={}&expires={}&signature={}",
            self.public_base_url.trim_end_matches('/'),
            document_key,
            tenant,
            expires_at,
            signature
        );

        Ok(UploadSlot {
            url,
            document_key: document_key.as_str().to_string(),
            expires_in: self.url_ttl_secs,
        })
    }
}
