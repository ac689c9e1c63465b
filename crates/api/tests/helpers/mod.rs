#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use serverwatch_api::{create_api_routes, AppState};
use serverwatch_application::{
    ports::{
        BackgroundQueryPort, CacheSettingsPort, QueryCompletion, QueryPoolStatus,
        ServerRegistryPort,
    },
    services::CacheTtlService,
    use_cases::{GetCacheStatsUseCase, GetServerStatusUseCase, ManageCacheUseCase},
};
use serverwatch_domain::{
    config::CacheConfig, CacheIntervals, DomainError, GameServerState, ServerStatusResult,
    ServerTarget,
};
use serverwatch_infrastructure::cache::{ManualClock, TtlCache};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const START_MS: u64 = 1_700_000_000_000;
pub const ADMIN_KEY: &str = "test-admin-key";

pub fn target(id: &str) -> ServerTarget {
    ServerTarget::new(
        Arc::from(id),
        Arc::from(format!("Server {}", id).as_str()),
        Arc::from("127.0.0.1"),
        27015,
        Arc::from("EU"),
        Arc::from(format!("steam://connect/127.0.0.1:27015/{}", id).as_str()),
        false,
    )
}

pub struct StaticRegistry {
    servers: Vec<ServerTarget>,
}

#[async_trait]
impl ServerRegistryPort for StaticRegistry {
    async fn load_servers(&self) -> Result<Vec<ServerTarget>, DomainError> {
        Ok(self.servers.clone())
    }
}

pub struct StaticSettings;

#[async_trait]
impl CacheSettingsPort for StaticSettings {
    async fn load_intervals(&self) -> Result<CacheIntervals, DomainError> {
        Ok(CacheIntervals::default())
    }
}

/// Answers every query with an online status after no delay.
pub struct InstantQuery {
    calls: AtomicU64,
}

impl InstantQuery {
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackgroundQueryPort for InstantQuery {
    async fn query_in_background(
        &self,
        target: &ServerTarget,
    ) -> Result<QueryCompletion, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = GameServerState {
            name: Some(target.name.to_string()),
            map: Some("ctf_2fort".to_string()),
            max_players: Some(32),
            players: Vec::new(),
        };
        Ok(QueryCompletion {
            result: ServerStatusResult::online(target, state, 12),
            joined_in_flight: false,
        })
    }

    fn status(&self) -> QueryPoolStatus {
        QueryPoolStatus {
            running_queries: 0,
            max_concurrent: 4,
            queued_queries: 0,
            active_queries: 0,
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub cache: Arc<TtlCache<ServerStatusResult>>,
    pub clock: Arc<ManualClock>,
    pub queries: Arc<InstantQuery>,
}

impl TestApp {
    pub fn new(admin_key: Option<&str>) -> Self {
        Self::with_servers(vec![target("main"), target("arena")], admin_key)
    }

    pub fn with_servers(servers: Vec<ServerTarget>, admin_key: Option<&str>) -> Self {
        let clock = Arc::new(ManualClock::new(START_MS));
        let cache = Arc::new(TtlCache::with_clock(clock.clone()));
        let queries = Arc::new(InstantQuery {
            calls: AtomicU64::new(0),
        });

        let server_status = Arc::new(GetServerStatusUseCase::new(
            Arc::new(StaticRegistry { servers }),
            cache.clone(),
            queries.clone(),
            Arc::new(CacheTtlService::new(Arc::new(StaticSettings))),
        ));

        let state = AppState {
            server_status,
            cache_stats: Arc::new(GetCacheStatsUseCase::new(cache.clone())),
            manage_cache: Arc::new(ManageCacheUseCase::new(
                cache.clone(),
                CacheConfig::default(),
            )),
            query_pool: queries.clone(),
            admin_key: admin_key.map(Arc::from),
        };

        Self {
            router: create_api_routes(state),
            cache,
            clock,
            queries,
        }
    }

    pub async fn get(&self, uri: &str, key: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method("GET");
        if let Some(key) = key {
            builder = builder.header("X-Api-Key", key);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, key: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header("X-Api-Key", key);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Waits for the background refresh spawned by a cache miss to land.
    pub async fn wait_for_key(&self, key: &str) {
        for _ in 0..100 {
            if self.cache.get(key).is_some() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("cache key {} was never written", key);
    }
}
