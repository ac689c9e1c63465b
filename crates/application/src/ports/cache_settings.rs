use async_trait::async_trait;
use serverwatch_domain::{CacheIntervals, DomainError};

/// Source of the admin-editable cache intervals.
///
/// Read on every call so interval changes apply on the next cache miss.
#[async_trait]
pub trait CacheSettingsPort: Send + Sync {
    async fn load_intervals(&self) -> Result<CacheIntervals, DomainError>;
}
