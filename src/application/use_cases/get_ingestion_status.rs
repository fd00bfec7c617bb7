use std::sync::Arc;

use uuid::Uuid;

use crate::application::tenant_registry::{TenantAccessError, TenantRegistry};
use crate::domain::entities::IngestionJob;
use crate::domain::repositories::IngestionJobRepository;

#[derive(Debug)]
pub enum GetIngestionStatusError {
    ValidationError(String),
    UnknownTenant(String),
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetIngestionStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetIngestionStatusError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            GetIngestionStatusError::UnknownTenant(_) => write!(f, "Invalid tenant ID"),
            GetIngestionStatusError::NotFound(id) => write!(f, "Ingestion job not found: {}", id),
            GetIngestionStatusError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GetIngestionStatusError {}

impl From<TenantAccessError> for GetIngestionStatusError {
    fn from(e: TenantAccessError) -> Self {
        match e {
            TenantAccessError::InvalidFormat(msg) => GetIngestionStatusError::ValidationError(msg),
            TenantAccessError::Unregistered(tenant) => {
                GetIngestionStatusError::UnknownTenant(tenant)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetIngestionStatusRequest {
    pub tenant_id: String,
    pub ingestion_job_id: Uuid,
}

pub struct GetIngestionStatusUseCase {
    registry: Arc<TenantRegistry>,
    job_repository: Arc<dyn IngestionJobRepository>,
}

impl GetIngestionStatusUseCase {
    pub fn new(
        registry: Arc<TenantRegistry>,
        job_repository: Arc<dyn IngestionJobRepository>,
    ) -> Self {
        Self {
            registry,
            job_repository,
        }
    }

    pub async fn execute(
        &self,
        request: GetIngestionStatusRequest,
    ) -> Result<IngestionJob, GetIngestionStatusError> {
        let tenant = self.registry.resolve(&request.tenant_id)?;

        let job = self
            .job_repository
            .find_by_id(request.ingestion_job_id)
            .await
            .map_err(|e| GetIngestionStatusError::RepositoryError(e.to_string()))?;

        // A job belonging to a different tenant is reported as missing, not
        // as forbidden.
        match job {
            Some(job) if job.tenant() == &tenant => Ok(job),
            _ => Err(GetIngestionStatusError::NotFound(request.ingestion_job_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::repositories::JobRepositoryError;
    use crate::domain::value_objects::{DocumentKey, TenantId};

    struct OneJob {
        job: IngestionJob,
    }

    #[async_trait]
    impl IngestionJobRepository for OneJob {
        async fn save(&self, _job: &IngestionJob) -> Result<(), JobRepositoryError> {
            Ok(())
        }

        async fn update(&self, _job: &IngestionJob) -> Result<(), JobRepositoryError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            job_id: Uuid,
        ) -> Result<Option<IngestionJob>, JobRepositoryError> {
            if self.job.id() == job_id {
                Ok(Some(self.job.clone()))
            } else {
                Ok(None)
            }
        }
    }

    fn fixture() -> (GetIngestionStatusUseCase, IngestionJob) {
        let job = IngestionJob::new(
            TenantId::new("acme").unwrap(),
            DocumentKey::parse("documents/raw/20250610_120000_abcd1234_a.md").unwrap(),
            "text/markdown".to_string(),
        );
        let use_case = GetIngestionStatusUseCase::new(
            Arc::new(TenantRegistry::new(vec![
                TenantId::new("acme").unwrap(),
                TenantId::new("globex").unwrap(),
            ])),
            Arc::new(OneJob { job: job.clone() }),
        );
        (use_case, job)
    }

    #[tokio::test]
    async fn test_owner_tenant_sees_job() {
        let (use_case, job) = fixture();

        let found = use_case
            .execute(GetIngestionStatusRequest {
                tenant_id: "acme".to_string(),
                ingestion_job_id: job.id(),
            })
            .await
            .unwrap();

        assert_eq!(found.id(), job.id());
    }

    #[tokio::test]
    async fn test_other_tenant_gets_not_found() {
        let (use_case, job) = fixture();

        let result = use_case
            .execute(GetIngestionStatusRequest {
                tenant_id: "globex".to_string(),
                ingestion_job_id: job.id(),
            })
            .await;

        assert!(matches!(result, Err(GetIngestionStatusError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_job_id_is_not_found() {
        let (use_case, _job) = fixture();

        let result = use_case
            .execute(GetIngestionStatusRequest {
                tenant_id: "acme".to_string(),
                ingestion_job_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(GetIngestionStatusError::NotFound(_))));
    }
}
