use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::IngestionJob;
use crate::domain::value_objects::{DocumentKey, IngestionStatus, TenantId};
use crate::infrastructure::database::schema::ingestion_jobs;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = ingestion_jobs)]
pub struct JobModel {
    pub id: Uuid,
    pub tenant: String,
    pub document_key: String,
    pub content_type: String,
    pub status: String,
    pub progress: f32,
    pub chunks_created: Option<i32>,
    pub embeddings_created: Option<i32>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = ingestion_jobs)]
#[diesel(treat_none_as_null = true)]
pub struct JobRow {
    pub id: Uuid,
    pub tenant: String,
    pub document_key: String,
    pub content_type: String,
    pub status: String,
    pub progress: f32,
    pub chunks_created: Option<i32>,
    pub embeddings_created: Option<i32>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&IngestionJob> for JobRow {
    fn from(job: &IngestionJob) -> Self {
        Self {
            id: job.id(),
            tenant: job.tenant().as_str().to_string(),
            document_key: job.document_key().as_str().to_string(),
            content_type: job.content_type().to_string(),
            status: job.status().as_str().to_string(),
            progress: job.progress(),
            chunks_created: job.chunks_created(),
            embeddings_created: job.embeddings_created(),
            error_message: job.status().error_message().map(str::to_string),
            created_at: job.created_at(),
            started_at: job.started_at(),
            completed_at: job.completed_at(),
        }
    }
}

impl TryFrom<JobModel> for IngestionJob {
    type Error = String;

    fn try_from(model: JobModel) -> Result<Self, Self::Error> {
        let tenant = TenantId::new(&model.tenant)?;
        let document_key = DocumentKey::parse(&model.document_key)?;
        let status = IngestionStatus::from_parts(&model.status, model.error_message.as_deref())?;

        Ok(IngestionJob::from_database(
            model.id,
            tenant,
            document_key,
            model.content_type,
            status,
            model.progress,
            model.chunks_created,
            model.embeddings_created,
            model.created_at,
            model.started_at,
            model.completed_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_and_entity_roundtrip() {
        let mut job = IngestionJob::new(
            TenantId::new("acme").unwrap(),
            DocumentKey::parse("documents/raw/20250610_120000_abcd1234_notes.md").unwrap(),
            "text/markdown".to_string(),
        );
        job.start().unwrap();
        job.fail("embedding service unreachable".to_string()).unwrap();

        let row = JobRow::from(&job);
        assert_eq!(row.status, "failed");
        assert_eq!(
            row.error_message.as_deref(),
            Some("embedding service unreachable")
        );

        let model = JobModel {
            id: row.id,
            tenant: row.tenant,
            document_key: row.document_key,
            content_type: row.content_type,
            status: row.status,
            progress: row.progress,
            chunks_created: row.chunks_created,
            embeddings_created: row.embeddings_created,
            error_message: row.error_message,
            created_at: row.created_at,
            started_at: row.started_at,
            completed_at: row.completed_at,
        };

        let restored = IngestionJob::try_from(model).unwrap();
        assert_eq!(restored, job);
    }

    #[test]
    fn test_bad_status_string_is_rejected() {
        let model = JobModel {
            id: Uuid::new_v4(),
            tenant: "acme".to_string(),
            document_key: "documents/raw/x.md".to_string(),
            content_type: "text/plain".to_string(),
            status: "exploded".to_string(),
            progress: 0.0,
            chunks_created: None,
            embeddings_created: None,
            error_message: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        };

        assert!(IngestionJob::try_from(model).is_err());
    }
}
