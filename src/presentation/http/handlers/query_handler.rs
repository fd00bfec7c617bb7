use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::QueryKnowledgeBaseUseCase;
use crate::application::use_cases::query_knowledge_base::{
    QueryKnowledgeBaseError, QueryKnowledgeBaseRequest,
};
use crate::presentation::http::dto::{ApiResponse, QueryRequestDto, QueryResponseDto};

pub struct QueryHandler {
    query_use_case: Arc<QueryKnowledgeBaseUseCase>,
}

impl QueryHandler {
    pub fn new(query_use_case: Arc<QueryKnowledgeBaseUseCase>) -> Self {
        Self { query_use_case }
    }

    pub async fn query_knowledge_base(
        State(handler): State<Arc<QueryHandler>>,
        headers: HeaderMap,
        Json(request): Json<QueryRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        if !headers.contains_key("x-user-id") {
            return Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error(
                    "UNAUTHORIZED",
                    "Unauthorized: User ID required".to_string(),
                    None,
                )),
            ));
        }

        let result = handler
            .query_use_case
            .execute(QueryKnowledgeBaseRequest {
                tenant_id: request.tenant_id,
                customer_id: request.customer_id,
                query: request.query,
                max_results: request.max_results,
            })
            .await;

        match result {
            Ok(outcome) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<QueryResponseDto>::success(outcome.into())),
            )),
            Err(e @ QueryKnowledgeBaseError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ QueryKnowledgeBaseError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
            Err(e @ QueryKnowledgeBaseError::RetrievalError(_)) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error("RETRIEVAL_FAILED", e.to_string(), None)),
            )),
            Err(e @ QueryKnowledgeBaseError::AnswerError(_)) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error("ANSWER_FAILED", e.to_string(), None)),
            )),
        }
    }
}
