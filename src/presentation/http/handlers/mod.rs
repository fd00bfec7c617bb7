pub mod chat_handler;
pub mod query_handler;
pub mod status_handler;
pub mod sync_handler;
pub mod upload_handler;

pub use chat_handler::ChatHandler;
pub use query_handler::QueryHandler;
pub use status_handler::StatusHandler;
pub use sync_handler::SyncHandler;
pub use upload_handler::UploadHandler;
