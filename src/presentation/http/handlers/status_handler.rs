use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::GetCustomerStatusUseCase;
use crate::application::use_cases::get_customer_status::{
    GetCustomerStatusError, GetCustomerStatusRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, CustomerStatusRequestDto, CustomerStatusResponseDto,
};

pub struct StatusHandler {
    get_customer_status_use_case: Arc<GetCustomerStatusUseCase>,
}

impl StatusHandler {
    pub fn new(get_customer_status_use_case: Arc<GetCustomerStatusUseCase>) -> Self {
        Self {
            get_customer_status_use_case,
        }
    }

    pub async fn customer_status(
        State(handler): State<Arc<StatusHandler>>,
        Json(request): Json<CustomerStatusRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .get_customer_status_use_case
            .execute(GetCustomerStatusRequest {
                tenant_id: request.tenant_id,
                customer_id: request.customer_id,
            })
            .await;

        match result {
            Ok(report) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<CustomerStatusResponseDto>::success(
                    report.into(),
                )),
            )),
            Err(e @ GetCustomerStatusError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ GetCustomerStatusError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
            Err(e @ GetCustomerStatusError::NotFound) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("STATUS_NOT_FOUND", e.to_string(), None)),
            )),
            Err(e @ GetCustomerStatusError::RepositoryError(_)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("STATUS_FAILED", e.to_string(), None)),
            )),
        }
    }
}
