use async_trait::async_trait;
use serverwatch_application::ports::{CacheAdminPort, CacheMaintenancePort, CacheSweepOutcome};
use serverwatch_domain::DomainError;
use std::sync::Arc;
use tracing::debug;

/// Infrastructure adapter implementing `CacheMaintenancePort` over a TTL cache.
pub struct TtlCacheMaintenance {
    cache: Arc<dyn CacheAdminPort>,
}

impl TtlCacheMaintenance {
    pub fn new(cache: Arc<dyn CacheAdminPort>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for TtlCacheMaintenance {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let entries_removed = self.cache.sweep_expired();
        let cache_size = self.cache.len();

        debug!(entries_removed, cache_size, "Cache sweep cycle completed");

        Ok(CacheSweepOutcome {
            entries_removed,
            cache_size,
        })
    }
}
