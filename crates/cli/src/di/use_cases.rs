use super::Adapters;
use serverwatch_application::services::CacheTtlService;
use serverwatch_application::use_cases::{
    GetCacheStatsUseCase, GetServerStatusUseCase, ManageCacheUseCase,
};
use serverwatch_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub server_status: Arc<GetServerStatusUseCase>,
    pub cache_stats: Arc<GetCacheStatsUseCase>,
    pub manage_cache: Arc<ManageCacheUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let ttl = Arc::new(CacheTtlService::new(adapters.settings.clone()));

        Self {
            server_status: Arc::new(GetServerStatusUseCase::new(
                adapters.registry.clone(),
                adapters.status_cache.clone(),
                adapters.query_pool.clone(),
                ttl,
            )),
            cache_stats: Arc::new(GetCacheStatsUseCase::new(adapters.status_cache.clone())),
            manage_cache: Arc::new(ManageCacheUseCase::new(
                adapters.status_cache.clone(),
                config.cache.clone(),
            )),
        }
    }
}
