pub mod ingestion_worker;
pub mod mpsc_sync_queue;

pub use ingestion_worker::IngestionWorker;
pub use mpsc_sync_queue::{MpscSyncQueue, MpscSyncQueueReceiver};
