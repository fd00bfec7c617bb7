use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::IngestionJob;

#[derive(Debug)]
pub enum JobRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for JobRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            JobRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for JobRepositoryError {}

#[async_trait]
pub trait IngestionJobRepository: Send + Sync {
    async fn save(&self, job: &IngestionJob) -> Result<(), JobRepositoryError>;

    async fn update(&self, job: &IngestionJob) -> Result<(), JobRepositoryError>;

    async fn find_by_id(&self, job_id: Uuid) -> Result<Option<IngestionJob>, JobRepositoryError>;
}
