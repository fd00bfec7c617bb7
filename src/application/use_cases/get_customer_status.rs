use std::sync::Arc;

use chrono::Utc;

use crate::application::tenant_registry::{TenantAccessError, TenantRegistry};
use crate::domain::entities::StatusReport;
use crate::domain::repositories::CustomerStatusRepository;
use crate::domain::value_objects::CustomerId;

#[derive(Debug)]
pub enum GetCustomerStatusError {
    ValidationError(String),
    UnknownTenant(String),
    NotFound,
    RepositoryError(String),
}

impl std::fmt::Display for GetCustomerStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetCustomerStatusError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            GetCustomerStatusError::UnknownTenant(_) => write!(f, "Invalid tenant ID"),
            GetCustomerStatusError::NotFound => {
                write!(f, "Customer status not found for tenant")
            }
            GetCustomerStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetCustomerStatusError {}

impl From<TenantAccessError> for GetCustomerStatusError {
    fn from(e: TenantAccessError) -> Self {
        match e {
            TenantAccessError::InvalidFormat(msg) => GetCustomerStatusError::ValidationError(msg),
            TenantAccessError::Unregistered(tenant) => {
                GetCustomerStatusError::UnknownTenant(tenant)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetCustomerStatusRequest {
    pub tenant_id: String,
    pub customer_id: Option<String>,
}

pub struct GetCustomerStatusUseCase {
    registry: Arc<TenantRegistry>,
    status_repository: Arc<dyn CustomerStatusRepository>,
}

impl GetCustomerStatusUseCase {
    pub fn new(
        registry: Arc<TenantRegistry>,
        status_repository: Arc<dyn CustomerStatusRepository>,
    ) -> Self {
        Self {
            registry,
            status_repository,
        }
    }

    pub async fn execute(
        &self,
        request: GetCustomerStatusRequest,
    ) -> Result<StatusReport, GetCustomerStatusError> {
        let tenant = self.registry.resolve(&request.tenant_id)?;

        let customer = match request.customer_id {
            Some(raw) => {
                Some(CustomerId::new(&raw).map_err(GetCustomerStatusError::ValidationError)?)
            }
            None => None,
        };

        let status = self
            .status_repository
            .find_status(&tenant, customer.as_ref())
            .await
            .map_err(|e| GetCustomerStatusError::RepositoryError(e.to_string()))?
            .ok_or(GetCustomerStatusError::NotFound)?;

        let milestones = self
            .status_repository
            .find_milestones(&tenant, &status.customer_id)
            .await
            .map_err(|e| GetCustomerStatusError::RepositoryError(e.to_string()))?;

        Ok(StatusReport::build(
            status,
            milestones,
            Utc::now().date_naive(),
        ))
    }
}
