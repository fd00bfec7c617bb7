use async_trait::async_trait;

use crate::domain::entities::{CustomerStatus, Milestone};
use crate::domain::value_objects::{CustomerId, TenantId};

#[derive(Debug)]
pub enum StatusRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for StatusRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            StatusRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for StatusRepositoryError {}

#[async_trait]
pub trait CustomerStatusRepository: Send + Sync {
    /// Fetch the status row for a customer, or the tenant's first row when no
    /// customer is given.
    async fn find_status(
        &self,
        tenant: &TenantId,
        customer: Option<&CustomerId>,
    ) -> Result<Option<CustomerStatus>, StatusRepositoryError>;

    async fn find_milestones(
        &self,
        tenant: &TenantId,
        customer: &CustomerId,
    ) -> Result<Vec<Milestone>, StatusRepositoryError>;
}
