use serde::{Deserialize, Serialize};

use crate::application::use_cases::create_upload_url::UploadSlot;
use crate::application::use_cases::receive_upload::ReceivedUpload;

#[derive(Debug, Deserialize)]
pub struct UploadUrlRequestDto {
    pub tenant_id: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadUrlResponseDto {
    pub url: String,
    pub document_key: String,
    pub expires_in: i64,
}

impl From<UploadSlot> for UploadUrlResponseDto {
    fn from(slot: UploadSlot) -> Self {
        Self {
            url: slot.url,
            document_key: slot.document_key,
            expires_in: slot.expires_in,
        }
    }
}

/// Query parameters carried by a signed upload URL.
#[derive(Debug, Deserialize)]
pub struct UploadQueryDto {
    pub tenant_id: String,
    pub expires: i64,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct UploadReceivedDto {
    pub document_key: String,
    pub size_bytes: usize,
}

impl From<ReceivedUpload> for UploadReceivedDto {
    fn from(received: ReceivedUpload) -> Self {
        Self {
            document_key: received.document_key,
            size_bytes: received.size_bytes,
        }
    }
}
