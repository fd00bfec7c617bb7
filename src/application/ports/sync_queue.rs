use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::value_objects::{DocumentKey, TenantId};

#[derive(Debug)]
pub enum SyncQueueError {
    QueueClosed(String),
}

impl std::fmt::Display for SyncQueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncQueueError::QueueClosed(msg) => write!(f, "Sync queue closed: {}", msg),
        }
    }
}

impl std::error::Error for SyncQueueError {}

/// Work item handed from the sync endpoint to the ingestion workers. The
/// authoritative job state lives in the jobs table; this is only the wakeup.
#[derive(Debug, Clone)]
pub struct QueuedSync {
    pub job_id: Uuid,
    pub tenant: TenantId,
    pub document_key: DocumentKey,
}

#[async_trait]
pub trait SyncQueue: Send + Sync {
    async fn enqueue(&self, item: QueuedSync) -> Result<(), SyncQueueError>;

    async fn depth(&self) -> usize;
}
