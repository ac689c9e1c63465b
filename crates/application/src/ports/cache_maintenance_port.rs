use async_trait::async_trait;
use serverwatch_domain::DomainError;

/// Outcome of a sweep of expired entries.
#[derive(Debug, Default, Clone)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for periodic cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Remove expired entries that nobody re-requested.
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError>;
}
