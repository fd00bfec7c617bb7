use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::ports::QueuedSync;
use crate::application::services::IngestionService;
use crate::application::services::ingestion_service::IngestionError;
use crate::domain::entities::{IngestionJob, IngestionOutcome};
use crate::domain::repositories::IngestionJobRepository;
use crate::infrastructure::messaging::MpscSyncQueueReceiver;

/// Drains the sync queue and runs the ingestion pipeline, persisting job
/// progress between stages.
pub struct IngestionWorker {
    receiver: Arc<MpscSyncQueueReceiver>,
    job_repository: Arc<dyn IngestionJobRepository>,
    ingestion_service: Arc<IngestionService>,
    worker_count: usize,
}

impl IngestionWorker {
    pub fn new(
        receiver: Arc<MpscSyncQueueReceiver>,
        job_repository: Arc<dyn IngestionJobRepository>,
        ingestion_service: Arc<IngestionService>,
    ) -> Self {
        Self {
            receiver,
            job_repository,
            ingestion_service,
            worker_count: 3,
        }
    }

    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count.max(1);
        self
    }

    pub async fn start(&self) {
        info!(workers = self.worker_count, "Starting ingestion workers");

        let mut handles = Vec::new();
        for worker_id in 0..self.worker_count {
            let worker = self.clone_for_worker();
            handles.push(tokio::spawn(async move {
                worker.worker_loop(worker_id).await;
            }));
        }

        for (worker_id, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                error!(worker_id, "Ingestion worker panicked: {}", e);
            }
        }

        info!("Ingestion workers stopped");
    }

    async fn worker_loop(&self, worker_id: usize) {
        info!(worker_id, "Ingestion worker started");

        while let Some(item) = self.receiver.recv().await {
            info!(worker_id, job_id = %item.job_id, key = %item.document_key, "Processing sync");
            self.process(item).await;
        }

        info!(worker_id, "Ingestion worker stopped, queue closed");
    }

    async fn process(&self, item: QueuedSync) {
        let mut job = match self.job_repository.find_by_id(item.job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                warn!(job_id = %item.job_id, "Queued sync has no persisted job, skipping");
                return;
            }
            Err(e) => {
                error!(job_id = %item.job_id, "Failed to load job: {}", e);
                return;
            }
        };

        if let Err(e) = job.start() {
            warn!(job_id = %job.id(), "Job not startable: {}", e);
            return;
        }
        self.persist(&job).await;

        let started = std::time::Instant::now();
        match self.run_pipeline(&mut job).await {
            Ok(outcome) => {
                if let Err(e) = job.complete(outcome) {
                    error!(job_id = %job.id(), "Failed to complete job: {}", e);
                } else {
                    info!(
                        job_id = %job.id(),
                        chunks = job.chunks_created().unwrap_or(0),
                        elapsed_s = started.elapsed().as_secs_f64(),
                        "Ingestion completed"
                    );
                }
            }
            Err(pipeline_error) => {
                error!(job_id = %job.id(), "Ingestion failed: {}", pipeline_error);
                if let Err(e) = job.fail(pipeline_error.to_string()) {
                    error!(job_id = %job.id(), "Failed to record job failure: {}", e);
                }
            }
        }

        self.persist(&job).await;
    }

    async fn run_pipeline(
        &self,
        job: &mut IngestionJob,
    ) -> Result<IngestionOutcome, IngestionError> {
        let tenant = job.tenant().clone();
        let key = job.document_key().clone();
        let content_type = job.content_type().to_string();

        let text = self.ingestion_service.load_raw_text(&tenant, &key).await?;
        self.advance(job, 0.25).await;

        let chunks = self
            .ingestion_service
            .split_document(&tenant, &key, &content_type, &text)?;
        self.advance(job, 0.4).await;

        let records = self.ingestion_service.embed_chunks(&chunks).await?;
        self.advance(job, 0.7).await;

        let inserted = self
            .ingestion_service
            .replace_vectors(&tenant, &key, &records)
            .await?;
        self.advance(job, 0.9).await;

        self.ingestion_service
            .write_processed(&tenant, &key, &text)
            .await?;

        Ok(IngestionOutcome {
            chunks_created: chunks.len() as i32,
            embeddings_created: inserted as i32,
        })
    }

    /// Progress updates are best-effort; a failed write never aborts the
    /// pipeline.
    async fn advance(&self, job: &mut IngestionJob, progress: f32) {
        if job.update_progress(progress).is_ok() {
            self.persist(job).await;
        }
    }

    async fn persist(&self, job: &IngestionJob) {
        if let Err(e) = self.job_repository.update(job).await {
            error!(job_id = %job.id(), "Failed to persist job state: {}", e);
        }
    }

    fn clone_for_worker(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            job_repository: self.job_repository.clone(),
            ingestion_service: self.ingestion_service.clone(),
            worker_count: self.worker_count,
        }
    }
}
