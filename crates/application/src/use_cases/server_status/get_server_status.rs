use crate::ports::{BackgroundQueryPort, CacheStore, ServerRegistryPort};
use crate::services::CacheTtlService;
use futures::future::join_all;
use serverwatch_domain::{
    server_status_key, CacheInfo, CacheSource, DomainError, ServerStatusResult, ServerTarget,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A status result paired with the cache metadata it was served with.
#[derive(Debug, Clone)]
pub struct ServerStatusView {
    pub server: ServerStatusResult,
    pub cache: CacheInfo,
}

/// Non-blocking read path for server status.
///
/// A fresh cache entry is returned as-is. A missing or expired entry yields a
/// `checking` placeholder immediately while a background query refreshes the
/// cache. Forcing a refresh drops the entry first.
pub struct GetServerStatusUseCase {
    registry: Arc<dyn ServerRegistryPort>,
    cache: Arc<dyn CacheStore<ServerStatusResult>>,
    queries: Arc<dyn BackgroundQueryPort>,
    ttl: Arc<CacheTtlService>,
}

impl GetServerStatusUseCase {
    pub fn new(
        registry: Arc<dyn ServerRegistryPort>,
        cache: Arc<dyn CacheStore<ServerStatusResult>>,
        queries: Arc<dyn BackgroundQueryPort>,
        ttl: Arc<CacheTtlService>,
    ) -> Self {
        Self {
            registry,
            cache,
            queries,
            ttl,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_one(
        &self,
        server_id: &str,
        force_refresh: bool,
    ) -> Result<ServerStatusView, DomainError> {
        let target = self
            .targets()
            .await
            .into_iter()
            .find(|t| t.id.as_ref() == server_id)
            .ok_or_else(|| DomainError::ServerNotFound(server_id.to_string()))?;

        Ok(self.resolve(target, force_refresh).await)
    }

    /// One view per registered target, in registry order.
    #[instrument(skip(self))]
    pub async fn get_all(&self, force_refresh: bool) -> Vec<ServerStatusView> {
        let targets = self.targets().await;
        join_all(
            targets
                .into_iter()
                .map(|target| self.resolve(target, force_refresh)),
        )
        .await
    }

    async fn targets(&self) -> Vec<ServerTarget> {
        match self.registry.load_servers().await {
            Ok(targets) => targets,
            Err(e) => {
                warn!(error = %e, "Failed to load server registry, using built-in servers");
                ServerTarget::builtin_registry()
            }
        }
    }

    async fn resolve(&self, target: ServerTarget, force_refresh: bool) -> ServerStatusView {
        let key = server_status_key(&target.id);

        if force_refresh {
            let removed = self.cache.delete(&key);
            debug!(server_id = %target.id, removed, "Forced status refresh");
        } else if let Some(entry) = self.cache.get(&key) {
            let now = self.cache.now_ms();
            if !entry.is_expired_at(now) {
                debug!(server_id = %target.id, "Status cache hit");
                return ServerStatusView {
                    cache: CacheInfo {
                        cached: true,
                        timestamp: entry.created_at_ms,
                        ttl: entry.remaining_ttl_secs_at(now),
                        source: CacheSource::Cache,
                    },
                    server: entry.value,
                };
            }
        }

        let ttl_secs = self.ttl.server_status_ttl().await;
        let placeholder = ServerStatusResult::checking(&target);
        self.dispatch_refresh(target, key, ttl_secs);

        ServerStatusView {
            server: placeholder,
            cache: CacheInfo {
                cached: false,
                timestamp: self.cache.now_ms(),
                ttl: 0,
                source: CacheSource::Checking,
            },
        }
    }

    fn dispatch_refresh(&self, target: ServerTarget, key: String, ttl_secs: u64) {
        let queries = Arc::clone(&self.queries);
        let cache = Arc::clone(&self.cache);

        tokio::spawn(async move {
            match queries.query_in_background(&target).await {
                // The caller that started the query owns the cache write.
                Ok(completion) if completion.joined_in_flight => {
                    debug!(server_id = %target.id, "Joined in-flight status query");
                }
                Ok(completion) => {
                    debug!(
                        server_id = %target.id,
                        status = completion.result.status.as_str(),
                        ttl_secs,
                        "Caching refreshed server status"
                    );
                    cache.set(&key, completion.result, ttl_secs);
                }
                Err(e) => {
                    warn!(server_id = %target.id, error = %e, "Background status query rejected");
                }
            }
        });
    }
}
