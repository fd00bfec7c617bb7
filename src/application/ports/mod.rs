pub mod answer_generator;
pub mod document_store;
pub mod embedding_provider;
pub mod sync_queue;

pub use answer_generator::{AnswerGenerator, AnswerGeneratorError};
pub use document_store::{DocumentStore, DocumentStoreError};
pub use embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
pub use sync_queue::{QueuedSync, SyncQueue, SyncQueueError};
