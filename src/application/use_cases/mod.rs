pub mod chat_with_knowledge_base;
pub mod create_upload_url;
pub mod get_customer_status;
pub mod get_ingestion_status;
pub mod query_knowledge_base;
pub mod receive_upload;
pub mod sync_document;

pub use chat_with_knowledge_base::ChatUseCase;
pub use create_upload_url::CreateUploadUrlUseCase;
pub use get_customer_status::GetCustomerStatusUseCase;
pub use get_ingestion_status::GetIngestionStatusUseCase;
pub use query_knowledge_base::QueryKnowledgeBaseUseCase;
pub use receive_upload::ReceiveUploadUseCase;
pub use sync_document::SyncDocumentUseCase;
