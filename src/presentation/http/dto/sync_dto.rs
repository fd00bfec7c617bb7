use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::sync_document::SyncQueued;
use crate::domain::entities::IngestionJob;

#[derive(Debug, Deserialize)]
pub struct SyncRequestDto {
    pub tenant_id: String,
    pub document_key: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponseDto {
    pub ingestion_job_id: Uuid,
    pub status: String,
    pub document_key: String,
}

impl From<SyncQueued> for SyncResponseDto {
    fn from(queued: SyncQueued) -> Self {
        Self {
            ingestion_job_id: queued.ingestion_job_id,
            status: queued.status,
            document_key: queued.document_key,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IngestionStatusRequestDto {
    pub tenant_id: String,
    pub ingestion_job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct IngestionStatusResponseDto {
    pub ingestion_job_id: Uuid,
    pub document_key: String,
    pub status: String,
    pub progress: f32,
    pub chunks_created: Option<i32>,
    pub embeddings_created: Option<i32>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<IngestionJob> for IngestionStatusResponseDto {
    fn from(job: IngestionJob) -> Self {
        Self {
            ingestion_job_id: job.id(),
            document_key: job.document_key().as_str().to_string(),
            status: job.status().as_str().to_string(),
            progress: job.progress(),
            chunks_created: job.chunks_created(),
            embeddings_created: job.embeddings_created(),
            error: job.status().error_message().map(str::to_string),
            created_at: job.created_at(),
            started_at: job.started_at(),
            completed_at: job.completed_at(),
        }
    }
}
