use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::application::ports::{QueuedSync, SyncQueue, SyncQueueError};

/// In-process sync queue: the HTTP handlers push, the ingestion workers pull.
pub struct MpscSyncQueue {
    sender: mpsc::UnboundedSender<QueuedSync>,
    depth: Arc<AtomicUsize>,
}

pub struct MpscSyncQueueReceiver {
    receiver: Mutex<mpsc::UnboundedReceiver<QueuedSync>>,
    depth: Arc<AtomicUsize>,
}

impl MpscSyncQueue {
    pub fn create_pair() -> (Self, MpscSyncQueueReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let depth = Arc::new(AtomicUsize::new(0));

        let queue = Self {
            sender,
            depth: depth.clone(),
        };
        let queue_receiver = MpscSyncQueueReceiver {
            receiver: Mutex::new(receiver),
            depth,
        };

        (queue, queue_receiver)
    }
}

#[async_trait]
impl SyncQueue for MpscSyncQueue {
    async fn enqueue(&self, item: QueuedSync) -> Result<(), SyncQueueError> {
        self.sender
            .send(item)
            .map_err(|e| SyncQueueError::QueueClosed(e.to_string()))?;
        self.depth.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }
}

impl MpscSyncQueueReceiver {
    pub async fn recv(&self) -> Option<QueuedSync> {
        let item = {
            let mut receiver = self.receiver.lock().await;
            receiver.recv().await
        };
        if item.is_some() {
            self.depth.fetch_sub(1, Ordering::SeqCst);
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::domain::value_objects::{DocumentKey, TenantId};

    fn item() -> QueuedSync {
        QueuedSync {
            job_id: Uuid::new_v4(),
            tenant: TenantId::new("acme").unwrap(),
            document_key: DocumentKey::parse("documents/raw/20250610_120000_abcd1234_a.md")
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_enqueue_then_recv() {
        let (queue, receiver) = MpscSyncQueue::create_pair();

        let queued = item();
        queue.enqueue(queued.clone()).await.unwrap();
        assert_eq!(queue.depth().await, 1);

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.job_id, queued.job_id);
        assert_eq!(queue.depth().await, 0);
    }

    #[tokio::test]
    async fn test_enqueue_after_receiver_dropped_fails() {
        let (queue, receiver) = MpscSyncQueue::create_pair();
        drop(receiver);

        let result = queue.enqueue(item()).await;
        assert!(matches!(result, Err(SyncQueueError::QueueClosed(_))));
    }
}
