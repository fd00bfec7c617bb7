use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::ChatUseCase;
use crate::application::use_cases::chat_with_knowledge_base::ChatRequest;
use crate::application::use_cases::query_knowledge_base::QueryKnowledgeBaseError;
use crate::presentation::http::dto::{ApiResponse, ChatRequestDto, ChatResponseDto};

pub struct ChatHandler {
    chat_use_case: Arc<ChatUseCase>,
}

impl ChatHandler {
    pub fn new(chat_use_case: Arc<ChatUseCase>) -> Self {
        Self { chat_use_case }
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        Json(request): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = handler
            .chat_use_case
            .execute(ChatRequest {
                tenant_id: request.tenant_id,
                message: request.message,
                use_kb: request.use_kb,
                customer_id: request.customer_id,
            })
            .await;

        match result {
            Ok(outcome) => Ok((
                StatusCode::OK,
                Json(ApiResponse::<ChatResponseDto>::success(outcome.into())),
            )),
            Err(e @ QueryKnowledgeBaseError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_REQUEST", e.to_string(), None)),
            )),
            Err(e @ QueryKnowledgeBaseError::UnknownTenant(_)) => Ok((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("UNKNOWN_TENANT", e.to_string(), None)),
            )),
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error("CHAT_FAILED", e.to_string(), None)),
            )),
        }
    }
}
