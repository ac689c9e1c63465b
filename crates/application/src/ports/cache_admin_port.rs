use serde::Serialize;
use serverwatch_domain::DomainError;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryStats {
    pub key: String,
    pub created_at: u64,
    pub expires_at: u64,
    pub remaining_ttl: u64,
    pub is_expired: bool,
    pub size_bytes: usize,
}

/// Snapshot of the cache for the admin panel.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_entries: usize,
    /// Sorted by soonest expiry first.
    pub per_entry: Vec<CacheEntryStats>,
    pub total_size_bytes: usize,
}

/// Type-erased administrative operations on a TTL cache.
pub trait CacheAdminPort: Send + Sync {
    fn stats(&self) -> CacheStats;
    fn delete(&self, key: &str) -> bool;
    fn clear(&self) -> usize;
    /// Fails with `InvalidPattern` when `pattern` is not a valid regex.
    fn delete_by_pattern(&self, pattern: &str) -> Result<usize, DomainError>;
    fn sweep_expired(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
