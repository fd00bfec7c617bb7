use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::IngestionJob;
use crate::domain::repositories::{IngestionJobRepository, JobRepositoryError};
use crate::infrastructure::database::models::{JobModel, JobRow};
use crate::infrastructure::database::schema::ingestion_jobs::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresJobRepository {
    pool: DbPool,
}

impl PostgresJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngestionJobRepository for PostgresJobRepository {
    async fn save(&self, job: &IngestionJob) -> Result<(), JobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| JobRepositoryError::DatabaseError(e.to_string()))?;

        diesel::insert_into(ingestion_jobs)
            .values(JobRow::from(job))
            .execute(&mut conn)
            .map_err(|e| JobRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, job: &IngestionJob) -> Result<(), JobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| JobRepositoryError::DatabaseError(e.to_string()))?;

        diesel::update(ingestion_jobs.find(job.id()))
            .set(JobRow::from(job))
            .execute(&mut conn)
            .map_err(|e| JobRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, job_id: Uuid) -> Result<Option<IngestionJob>, JobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| JobRepositoryError::DatabaseError(e.to_string()))?;

        let model = ingestion_jobs
            .find(job_id)
            .first::<JobModel>(&mut conn)
            .optional()
            .map_err(|e| JobRepositoryError::DatabaseError(e.to_string()))?;

        match model {
            Some(model) => {
                let job = IngestionJob::try_from(model)
                    .map_err(JobRepositoryError::ValidationError)?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }
}
