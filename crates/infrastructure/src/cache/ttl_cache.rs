use super::clock::{Clock, SystemClock};
use dashmap::DashMap;
use fancy_regex::Regex;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use serverwatch_application::ports::{CacheAdminPort, CacheEntryStats, CacheStats, CacheStore};
use serverwatch_domain::{CacheEntry, CacheSource, DomainError};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of [`TtlCache::get_or_fetch`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<V> {
    pub value: V,
    pub cached: bool,
    /// Unix milliseconds at which `value` was produced.
    pub timestamp: u64,
    /// Remaining TTL in seconds.
    pub ttl_remaining: u64,
    pub source: CacheSource,
    /// Set when a failed fetch was answered with an expired entry.
    pub error: Option<String>,
}

/// In-process key/value cache with per-entry TTL.
///
/// Expired entries stay in the map until they are overwritten, deleted or
/// swept, so they can still serve as a fallback when a refresh fails.
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>, FxBuildHasher>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            clock,
        }
    }

    /// Returns the entry regardless of expiry.
    pub fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn set(&self, key: &str, value: V, ttl_secs: u64) {
        let entry = CacheEntry::new(value, ttl_secs, self.clock.now_ms());
        self.entries.insert(key.to_string(), entry);
    }

    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        info!(cleared = count, "Cache cleared");
        count
    }

    /// Deletes every key matching `pattern`. An invalid regex deletes nothing.
    pub fn delete_by_pattern(&self, pattern: &str) -> Result<usize, DomainError> {
        let regex = Regex::new(pattern)
            .map_err(|e| DomainError::InvalidPattern(format!("{}: {}", pattern, e)))?;

        let matching: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| regex.is_match(entry.key()).unwrap_or(false))
            .map(|entry| entry.key().clone())
            .collect();

        let removed = matching
            .iter()
            .filter(|key| self.entries.remove(key.as_str()).is_some())
            .count();

        debug!(pattern, removed, "Deleted cache entries by pattern");
        Ok(removed)
    }

    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            debug!(removed, "Swept expired cache entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Serves a fresh entry, otherwise runs `fetch` and caches its value.
    ///
    /// When `fetch` fails and an expired entry exists, that entry is returned
    /// with `source: ExpiredFallback` and the failure message. Without one,
    /// the failure is returned as-is. `force_refresh` drops the entry first,
    /// which also rules out the fallback.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        fetch: F,
        ttl_secs: u64,
        force_refresh: bool,
    ) -> Result<FetchOutcome<V>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, DomainError>>,
    {
        if force_refresh {
            self.delete(key);
        } else if let Some(entry) = self.get(key) {
            let now = self.clock.now_ms();
            if !entry.is_expired_at(now) {
                return Ok(FetchOutcome {
                    cached: true,
                    timestamp: entry.created_at_ms,
                    ttl_remaining: entry.remaining_ttl_secs_at(now),
                    source: CacheSource::Cache,
                    error: None,
                    value: entry.value,
                });
            }
        }

        match fetch().await {
            Ok(value) => {
                let now = self.clock.now_ms();
                self.set(key, value.clone(), ttl_secs);
                Ok(FetchOutcome {
                    value,
                    cached: false,
                    timestamp: now,
                    ttl_remaining: ttl_secs,
                    source: CacheSource::Fresh,
                    error: None,
                })
            }
            Err(e) => match self.get(key) {
                Some(stale) => {
                    warn!(key, error = %e, "Fetch failed, serving expired entry");
                    Ok(FetchOutcome {
                        cached: true,
                        timestamp: stale.created_at_ms,
                        ttl_remaining: 0,
                        source: CacheSource::ExpiredFallback,
                        error: Some(e.to_string()),
                        value: stale.value,
                    })
                }
                None => Err(e),
            },
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Serialize> TtlCache<V> {
    /// Per-entry snapshot sorted by soonest expiry.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let mut per_entry: Vec<CacheEntryStats> = self
            .entries
            .iter()
            .map(|entry| {
                let cached = entry.value();
                CacheEntryStats {
                    key: entry.key().clone(),
                    created_at: cached.created_at_ms,
                    expires_at: cached.expires_at_ms,
                    remaining_ttl: cached.remaining_ttl_secs_at(now),
                    is_expired: cached.is_expired_at(now),
                    size_bytes: serde_json::to_vec(&cached.value)
                        .map(|bytes| bytes.len())
                        .unwrap_or(0),
                }
            })
            .collect();

        per_entry.sort_by(|a, b| a.expires_at.cmp(&b.expires_at).then_with(|| a.key.cmp(&b.key)));

        CacheStats {
            total_entries: per_entry.len(),
            total_size_bytes: per_entry.iter().map(|e| e.size_bytes).sum(),
            per_entry,
        }
    }
}

impl<V> CacheStore<V> for TtlCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        TtlCache::get(self, key)
    }

    fn set(&self, key: &str, value: V, ttl_secs: u64) {
        TtlCache::set(self, key, value, ttl_secs)
    }

    fn delete(&self, key: &str) -> bool {
        TtlCache::delete(self, key)
    }

    fn now_ms(&self) -> u64 {
        TtlCache::now_ms(self)
    }
}

impl<V> CacheAdminPort for TtlCache<V>
where
    V: Clone + Serialize + Send + Sync,
{
    fn stats(&self) -> CacheStats {
        TtlCache::stats(self)
    }

    fn delete(&self, key: &str) -> bool {
        TtlCache::delete(self, key)
    }

    fn clear(&self) -> usize {
        TtlCache::clear(self)
    }

    fn delete_by_pattern(&self, pattern: &str) -> Result<usize, DomainError> {
        TtlCache::delete_by_pattern(self, pattern)
    }

    fn sweep_expired(&self) -> usize {
        TtlCache::sweep_expired(self)
    }

    fn len(&self) -> usize {
        TtlCache::len(self)
    }
}
