use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Date, Nullable, Text, Timestamptz};

use crate::domain::entities::{CustomerStatus, Milestone, MilestoneStatus};
use crate::domain::repositories::{CustomerStatusRepository, StatusRepositoryError};
use crate::domain::value_objects::{CustomerId, ImplementationStage, TenantId};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

/// Reads the per-tenant status view and milestone tables under the
/// `customer_status` schema.
pub struct PostgresStatusRepository {
    pool: DbPool,
}

impl PostgresStatusRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn view(tenant: &TenantId) -> String {
        format!("customer_status.customer_status_view_{}", tenant.as_str())
    }

    fn milestones_table(tenant: &TenantId) -> String {
        format!("customer_status.customer_milestones_{}", tenant.as_str())
    }
}

#[derive(Debug, QueryableByName)]
struct StatusRow {
    #[diesel(sql_type = Text)]
    customer_id: String,
    #[diesel(sql_type = Text)]
    customer_name: String,
    #[diesel(sql_type = Text)]
    current_stage: String,
    #[diesel(sql_type = Nullable<Text>)]
    status_summary: Option<String>,
    #[diesel(sql_type = Nullable<Timestamptz>)]
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, QueryableByName)]
struct MilestoneRow {
    #[diesel(sql_type = Text)]
    milestone_id: String,
    #[diesel(sql_type = Text)]
    customer_id: String,
    #[diesel(sql_type = Text)]
    milestone_name: String,
    #[diesel(sql_type = Text)]
    status: String,
    #[diesel(sql_type = Nullable<Date>)]
    planned_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Date>)]
    completion_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Text>)]
    notes: Option<String>,
}

impl TryFrom<StatusRow> for CustomerStatus {
    type Error = String;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        Ok(CustomerStatus {
            customer_id: CustomerId::new(&row.customer_id)?,
            customer_name: row.customer_name,
            stage: ImplementationStage::parse(&row.current_stage),
            status_summary: row.status_summary,
            last_updated: row.last_updated,
        })
    }
}

impl TryFrom<MilestoneRow> for Milestone {
    type Error = String;

    fn try_from(row: MilestoneRow) -> Result<Self, Self::Error> {
        Ok(Milestone {
            milestone_id: row.milestone_id,
            customer_id: CustomerId::new(&row.customer_id)?,
            milestone_name: row.milestone_name,
            status: MilestoneStatus::parse(&row.status)?,
            planned_date: row.planned_date,
            completion_date: row.completion_date,
            notes: row.notes,
        })
    }
}

#[async_trait]
impl CustomerStatusRepository for PostgresStatusRepository {
    async fn find_status(
        &self,
        tenant: &TenantId,
        customer: Option<&CustomerId>,
    ) -> Result<Option<CustomerStatus>, StatusRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| StatusRepositoryError::DatabaseError(e.to_string()))?;

        let row: Option<StatusRow> = match customer {
            Some(customer) => diesel::sql_query(format!(
                "SELECT customer_id, customer_name, current_stage, status_summary, last_updated \
                 FROM {} WHERE customer_id = $1 LIMIT 1",
                Self::view(tenant)
            ))
            .bind::<Text, _>(customer.as_str())
            .get_result(&mut conn)
            .optional(),
            None => diesel::sql_query(format!(
                "SELECT customer_id, customer_name, current_stage, status_summary, last_updated \
                 FROM {} ORDER BY last_updated DESC NULLS LAST LIMIT 1",
                Self::view(tenant)
            ))
            .get_result(&mut conn)
            .optional(),
        }
        .map_err(|e| StatusRepositoryError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => {
                let status = CustomerStatus::try_from(row)
                    .map_err(StatusRepositoryError::ValidationError)?;
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }

    async fn find_milestones(
        &self,
        tenant: &TenantId,
        customer: &CustomerId,
    ) -> Result<Vec<Milestone>, StatusRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| StatusRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<MilestoneRow> = diesel::sql_query(format!(
            "SELECT milestone_id, customer_id, milestone_name, status, planned_date, \
             completion_date, notes \
             FROM {} WHERE customer_id = $1 ORDER BY planned_date ASC NULLS LAST, milestone_id",
            Self::milestones_table(tenant)
        ))
        .bind::<Text, _>(customer.as_str())
        .load(&mut conn)
        .map_err(|e| StatusRepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| Milestone::try_from(row).map_err(StatusRepositoryError::ValidationError))
            .collect()
    }
}
