use serverwatch_application::ports::BackgroundQueryPort;
use serverwatch_application::use_cases::{
    GetCacheStatsUseCase, GetServerStatusUseCase, ManageCacheUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub server_status: Arc<GetServerStatusUseCase>,
    pub cache_stats: Arc<GetCacheStatsUseCase>,
    pub manage_cache: Arc<ManageCacheUseCase>,
    pub query_pool: Arc<dyn BackgroundQueryPort>,
    /// Admin routes are open when unset.
    pub admin_key: Option<Arc<str>>,
}
