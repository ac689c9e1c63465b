use serverwatch_domain::{CacheCategory, CacheIntervals};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::CacheSettingsPort;

/// Resolves TTLs from the settings document, falling back to built-in defaults.
pub struct CacheTtlService {
    settings: Arc<dyn CacheSettingsPort>,
}

impl CacheTtlService {
    pub fn new(settings: Arc<dyn CacheSettingsPort>) -> Self {
        Self { settings }
    }

    /// Reads the settings on every call; never cached.
    pub async fn ttl_for(&self, category: CacheCategory) -> u64 {
        let intervals = match self.settings.load_intervals().await {
            Ok(intervals) => intervals,
            Err(e) => {
                warn!(error = %e, "Failed to load cache settings, using defaults");
                CacheIntervals::default()
            }
        };

        let ttl = intervals.ttl_for(category);
        debug!(category = ?category, ttl_secs = ttl, "Resolved cache TTL");
        ttl
    }

    pub async fn server_status_ttl(&self) -> u64 {
        self.ttl_for(CacheCategory::ServerStatus).await
    }
}
