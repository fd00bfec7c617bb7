pub mod document_key;
pub mod identifiers;
pub mod implementation_stage;
pub mod ingestion_status;

pub use document_key::DocumentKey;
pub use identifiers::{CustomerId, TenantId};
pub use implementation_stage::ImplementationStage;
pub use ingestion_status::IngestionStatus;
