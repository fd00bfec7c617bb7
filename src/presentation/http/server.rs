use axum::{
    Json, Router,
    routing::{get, post, put},
    serve,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::container::AppContainer;
use crate::presentation::http::dto::{ApiResponse, HealthResponseDto};
use crate::presentation::http::handlers::{
    ChatHandler, QueryHandler, StatusHandler, SyncHandler, UploadHandler,
};

pub async fn run(container: Arc<AppContainer>, config: &AppConfig) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(upload_routes(container.upload_handler.clone()))
        .merge(sync_routes(container.sync_handler.clone()))
        .merge(query_routes(container.query_handler.clone()))
        .merge(chat_routes(container.chat_handler.clone()))
        .merge(status_routes(container.status_handler.clone()))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(25 * 1024 * 1024))
        .layer(TraceLayer::new_for_http());

    info!(addr = %config.bind_addr, "KB manager API listening");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind server address");

    serve(listener, app).await.expect("Server error");
}

async fn health_check() -> Json<ApiResponse<HealthResponseDto>> {
    Json(ApiResponse::success(HealthResponseDto {
        status: "operational".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

fn upload_routes(handler: Arc<UploadHandler>) -> Router {
    Router::new()
        .route("/api/upload-url", post(UploadHandler::create_upload_url))
        .route(
            "/api/upload/{*document_key}",
            put(UploadHandler::receive_document),
        )
        .with_state(handler)
}

fn sync_routes(handler: Arc<SyncHandler>) -> Router {
    Router::new()
        .route("/api/kb/sync", post(SyncHandler::sync_document))
        .route("/api/kb/ingestion-status", post(SyncHandler::ingestion_status))
        .with_state(handler)
}

fn query_routes(handler: Arc<QueryHandler>) -> Router {
    Router::new()
        .route("/api/kb/query", post(QueryHandler::query_knowledge_base))
        .with_state(handler)
}

fn chat_routes(handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/api/chat", post(ChatHandler::chat))
        .with_state(handler)
}

fn status_routes(handler: Arc<StatusHandler>) -> Router {
    Router::new()
        .route("/api/customer-status", post(StatusHandler::customer_status))
        .with_state(handler)
}
