use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::create_upload_url::{
    CreateUploadUrlError, CreateUploadUrlRequest,
};
use crate::application::use_cases::receive_upload::{ReceiveUploadError, ReceiveUploadRequest};
use crate::application::use_cases::{CreateUploadUrlUseCase, ReceiveUploadUseCase};
use crate::presentation::http::dto::{
    ApiResponse, UploadQueryDto, UploadReceivedDto, UploadUrlRequestDto, UploadUrlResponseDto,
};

pub struct UploadHandler {
    create_upload_url_use_case: Arc<CreateUploadUrlUseCase>,
    receive_upload_use_case: Arc<ReceiveUploadUseCase>,
}

impl UploadHandler {
    pub fn new(
        create_upload_url_use_case: Arc<CreateUploadUrlUseCase>,
        receive_upload_use_case: Arc<ReceiveUploadUseCase>,
    ) -> Self {
        Self {
            create_upload_url_use_case,
            receive_upload_use_case,
        }
    }

    pub async fn create_upload_url(
        State(handler): State<Arc<UploadHandler>>,
        Json(request): Json<UploadUrlRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .create_upload_url_use_case
            .execute(CreateUploadUrlRequest {
                tenant_id: request.tenant_id,
                filename: request.filename,
            });

        match result {
            Ok(slot) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<UploadUrlResponseDto>::success(slot.into())),
            )),
            Err(e @ CreateUploadUrlError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ CreateUploadUrlError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
        }
    }

    pub async fn receive_document(
        State(handler): State<Arc<UploadHandler>>,
        Path(document_key): Path<String>,
        Query(params): Query<UploadQueryDto>,
        body: Bytes,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .receive_upload_use_case
            .execute(ReceiveUploadRequest {
                tenant_id: params.tenant_id,
                document_key,
                expires_at: params.expires,
                signature: params.signature,
                bytes: body.to_vec(),
            })
            .await;

        match result {
            Ok(received) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<UploadReceivedDto>::success(received.into())),
            )),
            Err(e @ ReceiveUploadError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ ReceiveUploadError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
            Err(e @ ReceiveUploadError::Expired) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UPLOAD_URL_EXPIRED", e.to_string(), None)),
            )),
            Err(e @ ReceiveUploadError::SignatureMismatch) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("BAD_SIGNATURE", e.to_string(), None)),
            )),
            Err(e @ ReceiveUploadError::StorageError(_)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("STORAGE_FAILED", e.to_string(), None)),
            )),
        }
    }
}
