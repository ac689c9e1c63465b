use serverwatch_application::ports::{
    CacheMaintenancePort, CacheSettingsPort, ServerQueryPort, ServerRegistryPort,
};
use serverwatch_domain::{Config, ServerStatusResult};
use serverwatch_infrastructure::cache::{SystemClock, TtlCache, TtlCacheMaintenance};
use serverwatch_infrastructure::query::{QueryWorkerPool, SourceQueryClient};
use serverwatch_infrastructure::registry::JsonServerRegistry;
use serverwatch_infrastructure::settings::JsonCacheSettings;
use std::sync::Arc;
use tracing::info;

pub struct Adapters {
    pub status_cache: Arc<TtlCache<ServerStatusResult>>,
    pub query_pool: Arc<QueryWorkerPool>,
    pub registry: Arc<dyn ServerRegistryPort>,
    pub settings: Arc<dyn CacheSettingsPort>,
    pub maintenance: Arc<dyn CacheMaintenancePort>,
}

impl Adapters {
    pub fn new(config: &Config) -> Self {
        let clock = Arc::new(SystemClock);
        let status_cache = Arc::new(TtlCache::with_clock(clock.clone()));

        let query: Arc<dyn ServerQueryPort> = Arc::new(SourceQueryClient::new());
        let query_pool = Arc::new(QueryWorkerPool::new(
            query,
            config.query.options(),
            config.query.max_concurrent,
            clock,
        ));

        info!(
            max_concurrent = config.query.max_concurrent,
            registry = %config.registry.path,
            settings = %config.settings.path,
            "Adapters initialized"
        );

        Self {
            maintenance: Arc::new(TtlCacheMaintenance::new(status_cache.clone())),
            status_cache,
            query_pool,
            registry: Arc::new(JsonServerRegistry::new(&config.registry.path)),
            settings: Arc::new(JsonCacheSettings::new(&config.settings.path)),
        }
    }
}
