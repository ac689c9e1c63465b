use async_trait::async_trait;
use serverwatch_application::ports::{
    BackgroundQueryPort, CacheAdminPort, CacheEntryStats, CacheSettingsPort, CacheStats,
    CacheStore, QueryCompletion, QueryPoolStatus, ServerRegistryPort,
};
use serverwatch_domain::{
    CacheEntry, CacheIntervals, DomainError, GameServerState, ServerStatusResult, ServerTarget,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub const START_MS: u64 = 1_700_000_000_000;

// ── registry ───────────────────────────────────────────────────────────────

pub struct MockServerRegistry {
    servers: RwLock<Vec<ServerTarget>>,
    should_fail: RwLock<bool>,
    load_calls: AtomicU64,
}

impl MockServerRegistry {
    pub fn new(servers: Vec<ServerTarget>) -> Self {
        Self {
            servers: RwLock::new(servers),
            should_fail: RwLock::new(false),
            load_calls: AtomicU64::new(0),
        }
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn set_servers(&self, servers: Vec<ServerTarget>) {
        *self.servers.write().await = servers;
    }

    pub fn load_calls(&self) -> u64 {
        self.load_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ServerRegistryPort for MockServerRegistry {
    async fn load_servers(&self) -> Result<Vec<ServerTarget>, DomainError> {
        self.load_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::RegistryError("mock registry failure".to_string()));
        }
        Ok(self.servers.read().await.clone())
    }
}

// ── settings ───────────────────────────────────────────────────────────────

pub struct MockCacheSettings {
    intervals: RwLock<CacheIntervals>,
    should_fail: RwLock<bool>,
    load_calls: AtomicU64,
}

impl MockCacheSettings {
    pub fn new() -> Self {
        Self {
            intervals: RwLock::new(CacheIntervals::default()),
            should_fail: RwLock::new(false),
            load_calls: AtomicU64::new(0),
        }
    }

    pub fn with_server_status_interval(secs: u64) -> Self {
        Self {
            intervals: RwLock::new(CacheIntervals {
                server_status_interval: Some(secs),
                ..CacheIntervals::default()
            }),
            ..Self::new()
        }
    }

    pub async fn set_server_status_interval(&self, secs: u64) {
        self.intervals.write().await.server_status_interval = Some(secs);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn load_calls(&self) -> u64 {
        self.load_calls.load(Ordering::Relaxed)
    }
}

impl Default for MockCacheSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheSettingsPort for MockCacheSettings {
    async fn load_intervals(&self) -> Result<CacheIntervals, DomainError> {
        self.load_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::IoError("settings unreadable".to_string()));
        }
        Ok(self.intervals.read().await.clone())
    }
}

// ── cache ──────────────────────────────────────────────────────────────────

/// In-memory cache with a manually advanced clock.
pub struct MockStatusCache {
    entries: Mutex<HashMap<String, CacheEntry<ServerStatusResult>>>,
    now_ms: AtomicU64,
    set_calls: AtomicU64,
}

impl MockStatusCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            now_ms: AtomicU64::new(START_MS),
            set_calls: AtomicU64::new(0),
        }
    }

    pub fn advance_secs(&self, secs: u64) {
        self.now_ms.fetch_add(secs * 1000, Ordering::Relaxed);
    }

    pub fn set_calls(&self) -> u64 {
        self.set_calls.load(Ordering::Relaxed)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn entry(&self, key: &str) -> Option<CacheEntry<ServerStatusResult>> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl Default for MockStatusCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore<ServerStatusResult> for MockStatusCache {
    fn get(&self, key: &str) -> Option<CacheEntry<ServerStatusResult>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: ServerStatusResult, ttl_secs: u64) {
        self.set_calls.fetch_add(1, Ordering::Relaxed);
        let entry = CacheEntry::new(value, ttl_secs, self.now_ms());
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.lock().unwrap().remove(key).is_some()
    }

    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

/// Admin surface over a set of keys. Patterns are matched as `^prefix` or
/// substring; `(` makes a pattern invalid.
pub struct MockCacheAdmin {
    keys: Mutex<Vec<(String, bool)>>,
    patterns_seen: Mutex<Vec<String>>,
}

impl MockCacheAdmin {
    /// `(key, expired)` pairs.
    pub fn with_keys(keys: &[(&str, bool)]) -> Self {
        Self {
            keys: Mutex::new(keys.iter().map(|(k, e)| (k.to_string(), *e)).collect()),
            patterns_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn patterns_seen(&self) -> Vec<String> {
        self.patterns_seen.lock().unwrap().clone()
    }

    fn matches(pattern: &str, key: &str) -> bool {
        match pattern.strip_prefix('^') {
            Some(prefix) => key.starts_with(prefix),
            None => key.contains(pattern),
        }
    }
}

impl CacheAdminPort for MockCacheAdmin {
    fn stats(&self) -> CacheStats {
        let keys = self.keys.lock().unwrap();
        CacheStats {
            total_entries: keys.len(),
            per_entry: keys
                .iter()
                .map(|(key, expired)| CacheEntryStats {
                    key: key.clone(),
                    created_at: START_MS,
                    expires_at: START_MS + 30_000,
                    remaining_ttl: if *expired { 0 } else { 30 },
                    is_expired: *expired,
                    size_bytes: 2,
                })
                .collect(),
            total_size_bytes: keys.len() * 2,
        }
    }

    fn delete(&self, key: &str) -> bool {
        let mut keys = self.keys.lock().unwrap();
        let before = keys.len();
        keys.retain(|(k, _)| k != key);
        keys.len() != before
    }

    fn clear(&self) -> usize {
        let mut keys = self.keys.lock().unwrap();
        let count = keys.len();
        keys.clear();
        count
    }

    fn delete_by_pattern(&self, pattern: &str) -> Result<usize, DomainError> {
        if pattern.contains('(') {
            return Err(DomainError::InvalidPattern(pattern.to_string()));
        }
        self.patterns_seen.lock().unwrap().push(pattern.to_string());
        let mut keys = self.keys.lock().unwrap();
        let before = keys.len();
        keys.retain(|(k, _)| !Self::matches(pattern, k));
        Ok(before - keys.len())
    }

    fn sweep_expired(&self) -> usize {
        let mut keys = self.keys.lock().unwrap();
        let before = keys.len();
        keys.retain(|(_, expired)| !expired);
        before - keys.len()
    }

    fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }
}

// ── background queries ─────────────────────────────────────────────────────

pub struct MockBackgroundQuery {
    query_calls: AtomicU64,
    offline: AtomicBool,
    joined: AtomicBool,
    should_fail: RwLock<bool>,
}

impl MockBackgroundQuery {
    pub fn new() -> Self {
        Self {
            query_calls: AtomicU64::new(0),
            offline: AtomicBool::new(false),
            joined: AtomicBool::new(false),
            should_fail: RwLock::new(false),
        }
    }

    /// Subsequent completions report the server as unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Subsequent completions report an attached (follower) caller.
    pub fn set_joined(&self, joined: bool) {
        self.joined.store(joined, Ordering::Relaxed);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn query_calls(&self) -> u64 {
        self.query_calls.load(Ordering::Relaxed)
    }
}

impl Default for MockBackgroundQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackgroundQueryPort for MockBackgroundQuery {
    async fn query_in_background(
        &self,
        target: &ServerTarget,
    ) -> Result<QueryCompletion, DomainError> {
        self.query_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::InvalidServerTarget(target.id.to_string()));
        }

        let result = if self.offline.load(Ordering::Relaxed) {
            ServerStatusResult::offline(target, "connection refused", START_MS)
        } else {
            let state = GameServerState {
                name: Some(format!("{} live", target.id)),
                map: Some("ctf_2fort".to_string()),
                max_players: Some(32),
                players: Vec::new(),
            };
            ServerStatusResult::online(target, state, START_MS)
        };

        Ok(QueryCompletion {
            result,
            joined_in_flight: self.joined.load(Ordering::Relaxed),
        })
    }

    fn status(&self) -> QueryPoolStatus {
        QueryPoolStatus {
            running_queries: 0,
            max_concurrent: 3,
            queued_queries: 0,
            active_queries: 0,
        }
    }
}
