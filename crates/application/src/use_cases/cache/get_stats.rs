use crate::ports::{CacheAdminPort, CacheStats};
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn CacheAdminPort>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn CacheAdminPort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheStats {
        self.cache.stats()
    }
}
