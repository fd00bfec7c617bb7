use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::get_ingestion_status::{
    GetIngestionStatusError, GetIngestionStatusRequest,
};
use crate::application::use_cases::sync_document::{SyncDocumentError, SyncDocumentRequest};
use crate::application::use_cases::{GetIngestionStatusUseCase, SyncDocumentUseCase};
use crate::presentation::http::dto::{
    ApiResponse, IngestionStatusRequestDto, IngestionStatusResponseDto, SyncRequestDto,
    SyncResponseDto,
};

pub struct SyncHandler {
    sync_document_use_case: Arc<SyncDocumentUseCase>,
    get_ingestion_status_use_case: Arc<GetIngestionStatusUseCase>,
}

impl SyncHandler {
    pub fn new(
        sync_document_use_case: Arc<SyncDocumentUseCase>,
        get_ingestion_status_use_case: Arc<GetIngestionStatusUseCase>,
    ) -> Self {
        Self {
            sync_document_use_case,
            get_ingestion_status_use_case,
        }
    }

    pub async fn sync_document(
        State(handler): State<Arc<SyncHandler>>,
        Json(request): Json<SyncRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .sync_document_use_case
            .execute(SyncDocumentRequest {
                tenant_id: request.tenant_id,
                document_key: request.document_key,
                content_type: request.content_type,
            })
            .await;

        match result {
            Ok(queued) => Ok((
                StatusCode::ACCEPTED,
                Json(ApiResponse::<SyncResponseDto>::success(queued.into())),
            )),
            Err(e @ SyncDocumentError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ SyncDocumentError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
            Err(e @ SyncDocumentError::DocumentNotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("DOCUMENT_NOT_FOUND", e.to_string(), None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("SYNC_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn ingestion_status(
        State(handler): State<Arc<SyncHandler>>,
        Json(request): Json<IngestionStatusRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .get_ingestion_status_use_case
            .execute(GetIngestionStatusRequest {
                tenant_id: request.tenant_id,
                ingestion_job_id: request.ingestion_job_id,
            })
            .await;

        match result {
            Ok(job) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<IngestionStatusResponseDto>::success(
                    job.into(),
                )),
            )),
            Err(e @ GetIngestionStatusError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ GetIngestionStatusError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
            Err(e @ GetIngestionStatusError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("JOB_NOT_FOUND", e.to_string(), None)),
            )),
            Err(e @ GetIngestionStatusError::RepositoryError(_)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("STATUS_FAILED", e.to_string(), None)),
            )),
        }
    }
}
