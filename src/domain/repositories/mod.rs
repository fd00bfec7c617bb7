pub mod customer_status_repository;
pub mod ingestion_job_repository;
pub mod vector_repository;

pub use customer_status_repository::{CustomerStatusRepository, StatusRepositoryError};
pub use ingestion_job_repository::{IngestionJobRepository, JobRepositoryError};
pub use vector_repository::{ChunkMatch, VectorRecord, VectorRepository, VectorRepositoryError};
