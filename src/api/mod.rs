// ==========================================
// Roteiro PCP - API layer
// ==========================================
// Responsibility: entry points for front ends (CLI, HTTP wrappers)
// Red line: no routing rules here, only orchestration
// ==========================================

pub mod error;
pub mod routing_api;

// Re-exports
pub use error::{ApiError, ApiResult};
pub use routing_api::{
    new_job_id, DownloadInfo, PreviewRow, ProcessUploadResponse, RoutingApi, MAX_UPLOAD_BYTES,
    PREVIEW_LIMIT,
};
