use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::{DocumentStore, QueuedSync, SyncQueue};
use crate::application::tenant_registry::{TenantAccessError, TenantRegistry};
use crate::domain::entities::IngestionJob;
use crate::domain::repositories::IngestionJobRepository;
use crate::domain::value_objects::DocumentKey;

#[derive(Debug)]
pub enum SyncDocumentError {
    ValidationError(String),
    UnknownTenant(String),
    DocumentNotFound(String),
    RepositoryError(String),
    QueueError(String),
}

impl std::fmt::Display for SyncDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SyncDocumentError::UnknownTenant(_) => write!(f, "Invalid tenant ID"),
            SyncDocumentError::DocumentNotFound(key) => write!(f, "Document not found: {}", key),
            SyncDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            SyncDocumentError::QueueError(msg) => write!(f, "Queue error: {}", msg),
        }
    }
}

impl std::error::Error for SyncDocumentError {}

impl From<TenantAccessError> for SyncDocumentError {
    fn from(e: TenantAccessError) -> Self {
        match e {
            TenantAccessError::InvalidFormat(msg) => SyncDocumentError::ValidationError(msg),
            TenantAccessError::Unregistered(tenant) => SyncDocumentError::UnknownTenant(tenant),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncDocumentRequest {
    pub tenant_id: String,
    pub document_key: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SyncQueued {
    pub ingestion_job_id: Uuid,
    pub status: String,
    pub document_key: String,
}

/// Creates a persistent ingestion job for an uploaded document and hands it
/// to the background workers.
pub struct SyncDocumentUseCase {
    registry: Arc<TenantRegistry>,
    document_store: Arc<dyn DocumentStore>,
    job_repository: Arc<dyn IngestionJobRepository>,
    sync_queue: Arc<dyn SyncQueue>,
}

impl SyncDocumentUseCase {
    pub fn new(
        registry: Arc<TenantRegistry>,
        document_store: Arc<dyn DocumentStore>,
        job_repository: Arc<dyn IngestionJobRepository>,
        sync_queue: Arc<dyn SyncQueue>,
    ) -> Self {
        Self {
            registry,
            document_store,
            job_repository,
            sync_queue,
        }
    }

    pub async fn execute(
        &self,
        request: SyncDocumentRequest,
    ) -> Result<SyncQueued, SyncDocumentError> {
        let tenant = self.registry.resolve(&request.tenant_id)?;
        let document_key = DocumentKey::parse(&request.document_key)
            .map_err(SyncDocumentError::ValidationError)?;

        let exists = self
            .document_store
            .exists(&tenant, document_key.as_str())
            .await
            .map_err(|e| SyncDocumentError::RepositoryError(e.to_string()))?;
        if !exists {
            return Err(SyncDocumentError::DocumentNotFound(
                document_key.as_str().to_string(),
            ));
        }

        let content_type = request
            .content_type
            .unwrap_or_else(|| default_content_type(&document_key));

        let job = IngestionJob::new(tenant.clone(), document_key.clone(), content_type);
        self.job_repository
            .save(&job)
            .await
            .map_err(|e| SyncDocumentError::RepositoryError(e.to_string()))?;

        let enqueue_result = self
            .sync_queue
            .enqueue(QueuedSync {
                job_id: job.id(),
                tenant,
                document_key: document_key.clone(),
            })
            .await;

        if let Err(queue_error) = enqueue_result {
            // Leave a failed job behind rather than a pending one nobody
            // will ever pick up.
            let mut failed = job;
            if failed.fail(queue_error.to_string()).is_ok() {
                let _ = self.job_repository.update(&failed).await;
            }
            return Err(SyncDocumentError::QueueError(queue_error.to_string()));
        }

        Ok(SyncQueued {
            ingestion_job_id: job.id(),
            status: job.status().as_str().to_string(),
            document_key: document_key.as_str().to_string(),
        })
    }
}

fn default_content_type(key: &DocumentKey) -> String {
    if key.basename().ends_with(".md") {
        "text/markdown".to_string()
    } else {
        "text/plain".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::{DocumentStoreError, SyncQueueError};
    use crate::domain::repositories::JobRepositoryError;
    use crate::domain::value_objects::TenantId;

    struct StaticStore {
        present: bool,
    }

    #[async_trait]
    impl DocumentStore for StaticStore {
        async fn put(
            &self,
            _tenant: &TenantId,
            _key: &str,
            _bytes: &[u8],
        ) -> Result<(), DocumentStoreError> {
            Ok(())
        }

        async fn get(&self, _tenant: &TenantId, key: &str) -> Result<Vec<u8>, DocumentStoreError> {
            Err(DocumentStoreError::NotFound(key.to_string()))
        }

        async fn exists(&self, _tenant: &TenantId, _key: &str) -> Result<bool, DocumentStoreError> {
            Ok(self.present)
        }
    }

    #[derive(Default)]
    struct MemoryJobs {
        jobs: Mutex<Vec<IngestionJob>>,
    }

    #[async_trait]
    impl IngestionJobRepository for MemoryJobs {
        async fn save(&self, job: &IngestionJob) -> Result<(), JobRepositoryError> {
            self.jobs.lock().unwrap().push(job.clone());
            Ok(())
        }

        async fn update(&self, job: &IngestionJob) -> Result<(), JobRepositoryError> {
            let mut jobs = self.jobs.lock().unwrap();
            if let Some(stored) = jobs.iter_mut().find(|j| j.id() == job.id()) {
                *stored = job.clone();
            }
            Ok(())
        }

        async fn find_by_id(
            &self,
            job_id: Uuid,
        ) -> Result<Option<IngestionJob>, JobRepositoryError> {
            Ok(self
                .jobs
                .lock()
                .unwrap()
                .iter()
                .find(|j| j.id() == job_id)
                .cloned())
        }
    }

    struct StubQueue {
        accept: bool,
        enqueued: Mutex<Vec<QueuedSync>>,
    }

    #[async_trait]
    impl SyncQueue for StubQueue {
        async fn enqueue(&self, item: QueuedSync) -> Result<(), SyncQueueError> {
            if self.accept {
                self.enqueued.lock().unwrap().push(item);
                Ok(())
            } else {
                Err(SyncQueueError::QueueClosed("channel closed".to_string()))
            }
        }

        async fn depth(&self) -> usize {
            self.enqueued.lock().unwrap().len()
        }
    }

    fn use_case(
        present: bool,
        accept: bool,
    ) -> (SyncDocumentUseCase, Arc<MemoryJobs>, Arc<StubQueue>) {
        let jobs = Arc::new(MemoryJobs::default());
        let queue = Arc::new(StubQueue {
            accept,
            enqueued: Mutex::new(Vec::new()),
        });
        let use_case = SyncDocumentUseCase::new(
            Arc::new(TenantRegistry::new(vec![TenantId::new("acme").unwrap()])),
            Arc::new(StaticStore { present }),
            jobs.clone(),
            queue.clone(),
        );
        (use_case, jobs, queue)
    }

    fn request() -> SyncDocumentRequest {
        SyncDocumentRequest {
            tenant_id: "acme".to_string(),
            document_key: "documents/raw/20250610_120000_abcd1234_notes.md".to_string(),
            content_type: None,
        }
    }

    #[tokio::test]
    async fn test_sync_persists_and_enqueues_job() {
        let (use_case, jobs, queue) = use_case(true, true);

        let queued = use_case.execute(request()).await.unwrap();
        assert_eq!(queued.status, "pending");

        let stored = jobs.jobs.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id(), queued.ingestion_job_id);
        assert_eq!(stored[0].content_type(), "text/markdown");

        let enqueued = queue.enqueued.lock().unwrap();
        assert_eq!(enqueued.len(), 1);
        assert_eq!(enqueued[0].job_id, queued.ingestion_job_id);
    }

    #[tokio::test]
    async fn test_missing_document_is_rejected() {
        let (use_case, jobs, _queue) = use_case(false, true);

        let result = use_case.execute(request()).await;
        assert!(matches!(result, Err(SyncDocumentError::DocumentNotFound(_))));
        assert!(jobs.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_queue_failure_marks_job_failed() {
        let (use_case, jobs, _queue) = use_case(true, false);

        let result = use_case.execute(request()).await;
        assert!(matches!(result, Err(SyncDocumentError::QueueError(_))));

        let stored = jobs.jobs.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].status().is_terminal());
    }

    #[tokio::test]
    async fn test_content_type_defaults_by_extension() {
        let (use_case, jobs, _queue) = use_case(true, true);

        use_case
            .execute(SyncDocumentRequest {
                tenant_id: "acme".to_string(),
                document_key: "documents/raw/20250610_120000_abcd1234_notes.txt".to_string(),
                content_type: None,
            })
            .await
            .unwrap();

        assert_eq!(jobs.jobs.lock().unwrap()[0].content_type(), "text/plain");
    }
}
