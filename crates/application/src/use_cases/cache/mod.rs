mod get_stats;
mod manage_cache;

pub use get_stats::GetCacheStatsUseCase;
pub use manage_cache::{CacheAction, CacheActionOutcome, ManageCacheUseCase};
