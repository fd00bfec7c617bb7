use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{DocumentKey, IngestionStatus, TenantId};

/// A tracked knowledge-base sync for one document. Jobs are persisted when
/// queued and updated by the background workers as ingestion progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionJob {
    id: Uuid,
    tenant: TenantId,
    document_key: DocumentKey,
    content_type: String,
    status: IngestionStatus,
    progress: f32,
    chunks_created: Option<i32>,
    embeddings_created: Option<i32>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub chunks_created: i32,
    pub embeddings_created: i32,
}

impl IngestionJob {
    pub fn new(tenant: TenantId, document_key: DocumentKey, content_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant,
            document_key,
            content_type,
            status: IngestionStatus::Pending,
            progress: 0.0,
            chunks_created: None,
            embeddings_created: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Reconstruct a job from its persisted row.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        tenant: TenantId,
        document_key: DocumentKey,
        content_type: String,
        status: IngestionStatus,
        progress: f32,
        chunks_created: Option<i32>,
        embeddings_created: Option<i32>,
        created_at: DateTime<Utc>,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            tenant,
            document_key,
            content_type,
            status,
            progress,
            chunks_created,
            embeddings_created,
            created_at,
            started_at,
            completed_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn document_key(&self) -> &DocumentKey {
        &self.document_key
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn status(&self) -> &IngestionStatus {
        &self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn chunks_created(&self) -> Option<i32> {
        self.chunks_created
    }

    pub fn embeddings_created(&self) -> Option<i32> {
        self.embeddings_created
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn start(&mut self) -> Result<(), String> {
        if !self.status.is_pending() {
            return Err(format!("Job is not pending: {}", self.status));
        }
        self.status = IngestionStatus::Processing;
        self.started_at = Some(Utc::now());
        self.progress = 0.1;
        Ok(())
    }

    pub fn update_progress(&mut self, progress: f32) -> Result<(), String> {
        if !self.status.is_processing() {
            return Err("Job is not processing".to_string());
        }
        if !(0.0..=1.0).contains(&progress) {
            return Err("Progress must be between 0.0 and 1.0".to_string());
        }
        self.progress = progress;
        Ok(())
    }

    pub fn complete(&mut self, outcome: IngestionOutcome) -> Result<(), String> {
        if !self.status.is_processing() {
            return Err("Job is not processing".to_string());
        }
        self.status = IngestionStatus::Completed;
        self.progress = 1.0;
        self.completed_at = Some(Utc::now());
        self.chunks_created = Some(outcome.chunks_created);
        self.embeddings_created = Some(outcome.embeddings_created);
        Ok(())
    }

    pub fn fail(&mut self, error: String) -> Result<(), String> {
        if self.status.is_terminal() {
            return Err("Job already finished".to_string());
        }
        self.status = IngestionStatus::Failed(error);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            (Some(start), None) if self.status.is_processing() => Some(Utc::now() - start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> IngestionJob {
        IngestionJob::new(
            TenantId::new("acme").unwrap(),
            DocumentKey::parse("documents/raw/20250610_120000_abcd1234_notes.md").unwrap(),
            "text/markdown".to_string(),
        )
    }

    #[test]
    fn test_happy_path() {
        let mut job = job();
        assert!(job.status().is_pending());
        assert!(job.is_active());

        assert!(job.start().is_ok());
        assert!(job.status().is_processing());
        assert!(job.started_at().is_some());

        assert!(job.update_progress(0.6).is_ok());
        assert_eq!(job.progress(), 0.6);

        let outcome = IngestionOutcome {
            chunks_created: 12,
            embeddings_created: 12,
        };
        assert!(job.complete(outcome).is_ok());
        assert_eq!(job.status(), &IngestionStatus::Completed);
        assert_eq!(job.progress(), 1.0);
        assert_eq!(job.chunks_created(), Some(12));
        assert!(!job.is_active());
    }

    #[test]
    fn test_cannot_complete_before_start() {
        let mut job = job();
        let outcome = IngestionOutcome {
            chunks_created: 1,
            embeddings_created: 1,
        };
        assert!(job.complete(outcome).is_err());
    }

    #[test]
    fn test_failure_records_error() {
        let mut job = job();
        job.start().unwrap();
        assert!(job.fail("embedding service unreachable".to_string()).is_ok());
        assert_eq!(
            job.status().error_message(),
            Some("embedding service unreachable")
        );
        assert!(job.completed_at().is_some());
    }

    #[test]
    fn test_terminal_jobs_are_frozen() {
        let mut job = job();
        job.start().unwrap();
        job.fail("boom".to_string()).unwrap();

        assert!(job.fail("again".to_string()).is_err());
        assert!(job.update_progress(0.5).is_err());
        assert!(job.start().is_err());
    }

    #[test]
    fn test_pending_job_can_fail() {
        // A job that never reached a worker (queue shutdown) still fails
        // cleanly rather than staying pending forever.
        let mut job = job();
        assert!(job.fail("queue closed".to_string()).is_ok());
        assert!(job.status().is_terminal());
    }
}
