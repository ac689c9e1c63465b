pub mod cache;
pub mod server_status;

pub use cache::{AdminEnvelope, CacheActionRequest, CacheActionResponse};
pub use server_status::{
    ServerStatusBatchResponse, ServerStatusEntry, ServerStatusQuery, ServerStatusResponse,
};
