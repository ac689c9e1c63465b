use serverwatch_domain::CacheEntry;

/// Key/value access to a TTL cache.
///
/// `get` never evaluates expiry; callers compare the entry against `now_ms`.
pub trait CacheStore<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry<V>>;

    /// Replaces any existing entry.
    fn set(&self, key: &str, value: V, ttl_secs: u64);

    fn delete(&self, key: &str) -> bool;

    /// Current time of the cache's clock, in Unix milliseconds.
    fn now_ms(&self) -> u64;
}
