pub mod cache;
pub mod server_status;

// Re-export use cases
pub use cache::{CacheAction, CacheActionOutcome, GetCacheStatsUseCase, ManageCacheUseCase};
pub use server_status::{GetServerStatusUseCase, ServerStatusView};
