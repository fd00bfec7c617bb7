pub mod chat_dto;
pub mod query_dto;
pub mod response_dto;
pub mod status_dto;
pub mod sync_dto;
pub mod upload_dto;

pub use chat_dto::{ChatRequestDto, ChatResponseDto};
pub use query_dto::{ChunkResultDto, QueryRequestDto, QueryResponseDto};
pub use response_dto::{ApiError, ApiResponse, HealthResponseDto};
pub use status_dto::{CustomerStatusRequestDto, CustomerStatusResponseDto, MilestoneDto};
pub use sync_dto::{
    IngestionStatusRequestDto, IngestionStatusResponseDto, SyncRequestDto, SyncResponseDto,
};
pub use upload_dto::{
    UploadQueryDto, UploadReceivedDto, UploadUrlRequestDto, UploadUrlResponseDto,
};
