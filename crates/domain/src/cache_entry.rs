use serde::{Deserialize, Serialize};

/// A cached value together with the time it was stored and its TTL.
///
/// Entries are immutable once created: a refresh replaces the entry rather
/// than extending it.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    /// Insertion time in Unix milliseconds.
    pub created_at_ms: u64,
    pub ttl_secs: u64,
    /// `created_at_ms + ttl_secs * 1000`.
    pub expires_at_ms: u64,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, ttl_secs: u64, now_ms: u64) -> Self {
        Self {
            value,
            created_at_ms: now_ms,
            ttl_secs,
            expires_at_ms: now_ms.saturating_add(ttl_secs.saturating_mul(1000)),
        }
    }

    /// Still fresh at exactly `expires_at_ms`.
    #[inline]
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at_ms
    }

    /// Whole seconds left before expiry, floored, never negative.
    #[inline]
    pub fn remaining_ttl_secs_at(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms) / 1000
    }
}

/// Where a served value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheSource {
    Cache,
    Fresh,
    ExpiredFallback,
    Checking,
}

impl CacheSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheSource::Cache => "cache",
            CacheSource::Fresh => "fresh",
            CacheSource::ExpiredFallback => "expired_fallback",
            CacheSource::Checking => "checking",
        }
    }
}

/// Cache metadata attached to every status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInfo {
    pub cached: bool,
    /// Unix milliseconds of the served data (or of the request for placeholders).
    pub timestamp: u64,
    /// Remaining TTL in seconds.
    pub ttl: u64,
    pub source: CacheSource,
}
