use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Jsonb, Text, Uuid as SqlUuid};
use pgvector::Vector;
use pgvector::sql_types::Vector as SqlVector;
use uuid::Uuid;

use crate::domain::repositories::{
    ChunkMatch, VectorRecord, VectorRepository, VectorRepositoryError,
};
use crate::domain::value_objects::{DocumentKey, TenantId};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

/// Vector access against the per-tenant `kb_vectors_{tenant}` tables. The
/// table name interpolation is safe because `TenantId` admits only
/// `[a-zA-Z0-9_-]{1,20}`.
pub struct PostgresVectorRepository {
    pool: DbPool,
}

impl PostgresVectorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn table(tenant: &TenantId) -> String {
        format!("kb_vectors_{}", tenant.as_str())
    }
}

#[derive(Debug, QueryableByName)]
struct MatchRow {
    #[diesel(sql_type = SqlUuid)]
    id: Uuid,
    #[diesel(sql_type = Text)]
    chunk_text: String,
    #[diesel(sql_type = Jsonb)]
    metadata: serde_json::Value,
    #[diesel(sql_type = diesel::sql_types::Float8)]
    similarity: f64,
}

#[derive(Debug, QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[async_trait]
impl VectorRepository for PostgresVectorRepository {
    async fn insert_batch(
        &self,
        tenant: &TenantId,
        records: &[VectorRecord],
    ) -> Result<usize, VectorRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))?;

        let insert_sql = format!(
            "INSERT INTO {} (id, embedding, chunk_text, metadata) VALUES ($1, $2, $3, $4)",
            Self::table(tenant)
        );

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut inserted = 0;
            for record in records {
                inserted += diesel::sql_query(insert_sql.as_str())
                    .bind::<SqlUuid, _>(record.id)
                    .bind::<SqlVector, _>(record.embedding.clone())
                    .bind::<Text, _>(&record.chunk_text)
                    .bind::<Jsonb, _>(&record.metadata)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
        .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))
    }

    async fn delete_by_source(
        &self,
        tenant: &TenantId,
        document_key: &DocumentKey,
    ) -> Result<usize, VectorRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))?;

        diesel::sql_query(format!(
            "DELETE FROM {} WHERE metadata->>'source' = $1",
            Self::table(tenant)
        ))
        .bind::<Text, _>(document_key.as_str())
        .execute(&mut conn)
        .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))
    }

    async fn similarity_search(
        &self,
        tenant: &TenantId,
        query: &Vector,
        limit: i64,
    ) -> Result<Vec<ChunkMatch>, VectorRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<MatchRow> = diesel::sql_query(format!(
            "SELECT id, chunk_text, metadata, 1 - (embedding <=> $1) AS similarity \
             FROM {} ORDER BY embedding <=> $1 LIMIT $2",
            Self::table(tenant)
        ))
        .bind::<SqlVector, _>(query.clone())
        .bind::<BigInt, _>(limit)
        .load(&mut conn)
        .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| ChunkMatch {
                id: row.id,
                chunk_text: row.chunk_text,
                metadata: row.metadata,
                similarity: row.similarity as f32,
            })
            .collect())
    }

    async fn count(&self, tenant: &TenantId) -> Result<i64, VectorRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))?;

        let row: CountRow = diesel::sql_query(format!(
            "SELECT COUNT(*) AS count FROM {}",
            Self::table(tenant)
        ))
        .get_result(&mut conn)
        .map_err(|e| VectorRepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.count)
    }
}
