pub mod answer_service;
pub mod ingestion_service;
pub mod retrieval_service;

pub use answer_service::{AnswerService, NO_ANSWER};
pub use ingestion_service::IngestionService;
pub use retrieval_service::{RetrievalService, RetrievedChunk};
