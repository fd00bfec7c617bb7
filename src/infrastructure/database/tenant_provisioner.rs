use diesel::PgConnection;
use diesel::prelude::*;
use tracing::info;

use crate::domain::value_objects::TenantId;
use crate::infrastructure::database::{DatabaseError, DbPool, get_connection_from_pool};

/// Creates the per-tenant tables, indexes, and the status view at startup.
/// Every statement is idempotent, so re-running on boot is safe.
pub struct TenantProvisioner {
    pool: DbPool,
    embedding_dimension: usize,
}

impl TenantProvisioner {
    pub fn new(pool: DbPool, embedding_dimension: usize) -> Self {
        Self {
            pool,
            embedding_dimension,
        }
    }

    pub fn provision_all(&self, tenants: &[TenantId]) -> Result<(), DatabaseError> {
        let mut conn = get_connection_from_pool(&self.pool)?;
        for tenant in tenants {
            self.provision(&mut conn, tenant)?;
            info!(tenant = %tenant, "Provisioned tenant tables");
        }
        Ok(())
    }

    fn provision(&self, conn: &mut PgConnection, tenant: &TenantId) -> Result<(), DatabaseError> {
        let t = tenant.as_str();

        let statements = vec![
            format!(
                "CREATE TABLE IF NOT EXISTS kb_vectors_{t} (\
                 id UUID PRIMARY KEY, \
                 embedding vector({dim}) NOT NULL, \
                 chunk_text TEXT NOT NULL, \
                 metadata JSONB NOT NULL DEFAULT '{{}}'::jsonb)",
                t = t,
                dim = self.embedding_dimension
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS kb_vectors_{t}_embedding_idx \
                 ON kb_vectors_{t} USING hnsw (embedding vector_cosine_ops)",
                t = t
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS kb_vectors_{t}_metadata_idx \
                 ON kb_vectors_{t} USING gin (metadata)",
                t = t
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS customer_status.customers_{t} (\
                 customer_id TEXT PRIMARY KEY, \
                 customer_name TEXT NOT NULL, \
                 current_stage TEXT NOT NULL, \
                 status_summary TEXT, \
                 last_updated TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP)",
                t = t
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS customer_status.customer_milestones_{t} (\
                 milestone_id TEXT PRIMARY KEY, \
                 customer_id TEXT NOT NULL REFERENCES customer_status.customers_{t}(customer_id), \
                 milestone_name TEXT NOT NULL, \
                 status TEXT NOT NULL, \
                 planned_date DATE, \
                 completion_date DATE, \
                 notes TEXT)",
                t = t
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS customer_milestones_{t}_customer_idx \
                 ON customer_status.customer_milestones_{t} (customer_id)",
                t = t
            ),
            format!(
                "CREATE OR REPLACE VIEW customer_status.customer_status_view_{t} AS \
                 SELECT c.customer_id, c.customer_name, c.current_stage, \
                 CASE \
                 WHEN c.current_stage = 'Onboarding' THEN 1 \
                 WHEN c.current_stage = 'Planning' THEN 2 \
                 WHEN c.current_stage = 'Implementation' THEN 3 \
                 WHEN c.current_stage = 'Testing' THEN 4 \
                 WHEN c.current_stage = 'Go-Live' THEN 5 \
                 WHEN c.current_stage = 'Post-Launch' THEN 6 \
                 ELSE 99 END AS stage_order, \
                 c.status_summary, c.last_updated \
                 FROM customer_status.customers_{t} c",
                t = t
            ),
        ];

        for sql in statements {
            diesel::sql_query(sql)
                .execute(conn)
                .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        }

        Ok(())
    }
}
