use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::domain::value_objects::TenantId;

/// Signs and verifies time-limited upload URLs. The signature covers the
/// tenant, the document key, and the expiry timestamp, so none of them can
/// be swapped after issuance.
#[derive(Debug, Clone)]
pub struct UploadSigner {
    secret: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignatureError {
    Expired,
    Mismatch,
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureError::Expired => write!(f, "Upload URL has expired"),
            SignatureError::Mismatch => write!(f, "Upload signature does not match"),
        }
    }
}

impl std::error::Error for SignatureError {}

impl UploadSigner {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn sign(&self, tenant: &TenantId, document_key: &str, expires_at: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b"\n");
        hasher.update(tenant.as_str().as_bytes());
        hasher.update(b"\n");
        hasher.update(document_key.as_bytes());
        hasher.update(b"\n");
        hasher.update(expires_at.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify(
        &self,
        tenant: &TenantId,
        document_key: &str,
        expires_at: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        if now.timestamp() > expires_at {
            return Err(SignatureError::Expired);
        }

        let expected = self.sign(tenant, document_key, expires_at);
        if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tenant() -> TenantId {
        TenantId::new("acme").unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = UploadSigner::new("secret".to_string());
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let expires = now.timestamp() + 3600;

        let signature = signer.sign(&tenant(), "documents/raw/x.md", expires);
        assert!(
            signer
                .verify(&tenant(), "documents/raw/x.md", expires, &signature, now)
                .is_ok()
        );
    }

    #[test]
    fn test_expired_url_is_rejected() {
        let signer = UploadSigner::new("secret".to_string());
        let issued = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let expires = issued.timestamp() + 3600;
        let later = issued + chrono::Duration::seconds(3601);

        let signature = signer.sign(&tenant(), "documents/raw/x.md", expires);
        assert_eq!(
            signer.verify(&tenant(), "documents/raw/x.md", expires, &signature, later),
            Err(SignatureError::Expired)
        );
    }

    #[test]
    fn test_tampered_fields_are_rejected() {
        let signer = UploadSigner::new("secret".to_string());
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let expires = now.timestamp() + 3600;
        let signature = signer.sign(&tenant(), "documents/raw/x.md", expires);

        // different key
        assert_eq!(
            signer.verify(&tenant(), "documents/raw/y.md", expires, &signature, now),
            Err(SignatureError::Mismatch)
        );
        // different tenant
        let other = TenantId::new("globex").unwrap();
        assert_eq!(
            signer.verify(&other, "documents/raw/x.md", expires, &signature, now),
            Err(SignatureError::Mismatch)
        );
        // stretched expiry
        assert_eq!(
            signer.verify(&tenant(), "documents/raw/x.md", expires + 60, &signature, now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_signatures_depend_on_secret() {
        let a = UploadSigner::new("secret-a".to_string());
        let b = UploadSigner::new("secret-b".to_string());
        assert_ne!(
            a.sign(&tenant(), "documents/raw/x.md", 100),
            b.sign(&tenant(), "documents/raw/x.md", 100)
        );
    }
}
