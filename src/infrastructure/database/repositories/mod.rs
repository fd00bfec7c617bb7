pub mod postgres_job_repository;
pub mod postgres_status_repository;
pub mod postgres_vector_repository;

pub use postgres_job_repository::PostgresJobRepository;
pub use postgres_status_repository::PostgresStatusRepository;
pub use postgres_vector_repository::PostgresVectorRepository;
