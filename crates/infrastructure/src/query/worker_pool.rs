use crate::cache::Clock;
use async_trait::async_trait;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use serverwatch_application::ports::{
    BackgroundQueryPort, QueryCompletion, QueryPoolStatus, ServerQueryPort,
};
use serverwatch_domain::{DomainError, QueryOptions, ServerStatusResult, ServerTarget};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tracing::{debug, info, warn};

type InflightSender = Arc<watch::Sender<Option<Arc<ServerStatusResult>>>>;
type InflightMap = DashMap<Arc<str>, InflightSender, FxBuildHasher>;

/// Removes the in-flight entry however the leader exits, waking followers.
struct InflightLeaderGuard {
    inflight: Arc<InflightMap>,
    key: Arc<str>,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if let Some((_, tx)) = self.inflight.remove(&self.key) {
            let _ = tx.send(None);
        }
    }
}

struct CounterGuard<'a>(&'a AtomicUsize);

impl<'a> CounterGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for CounterGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

struct PoolInner {
    query: Arc<dyn ServerQueryPort>,
    options: QueryOptions,
    clock: Arc<dyn Clock>,
    max_concurrent: usize,
    permits: Semaphore,
    running: AtomicUsize,
    queued: AtomicUsize,
    inflight: Arc<InflightMap>,
}

/// Bounded executor for server queries with per-target deduplication.
///
/// The first caller for a target id leads: it queues for one of
/// `max_concurrent` permits (FIFO) and runs the query on its own task, so a
/// dropped caller never cancels it. Concurrent callers for the same id wait
/// on the leader's result.
pub struct QueryWorkerPool {
    inner: Arc<PoolInner>,
}

impl QueryWorkerPool {
    pub fn new(
        query: Arc<dyn ServerQueryPort>,
        options: QueryOptions,
        max_concurrent: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            inner: Arc::new(PoolInner {
                query,
                options,
                clock,
                max_concurrent,
                permits: Semaphore::new(max_concurrent),
                running: AtomicUsize::new(0),
                queued: AtomicUsize::new(0),
                inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            }),
        }
    }

    pub fn status(&self) -> QueryPoolStatus {
        QueryPoolStatus {
            running_queries: self.inner.running.load(Ordering::Relaxed),
            max_concurrent: self.inner.max_concurrent,
            queued_queries: self.inner.queued.load(Ordering::Relaxed),
            active_queries: self.inner.inflight.len(),
        }
    }

    /// Waits for running queries to finish and stops admitting new ones.
    ///
    /// Queries submitted afterwards resolve to `offline`.
    pub async fn drain(&self) {
        let status = self.status();
        info!(
            running = status.running_queries,
            queued = status.queued_queries,
            "Draining query pool"
        );

        if let Ok(all) = self
            .inner
            .permits
            .acquire_many(self.inner.max_concurrent as u32)
            .await
        {
            all.forget();
        }
        self.inner.permits.close();
    }

    fn register_or_join_inflight(
        &self,
        key: &Arc<str>,
    ) -> (bool, watch::Receiver<Option<Arc<ServerStatusResult>>>) {
        match self.inner.inflight.entry(Arc::clone(key)) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None::<Arc<ServerStatusResult>>);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn query_as_follower(
        &self,
        target: &ServerTarget,
        mut rx: watch::Receiver<Option<Arc<ServerStatusResult>>>,
    ) -> ServerStatusResult {
        debug!(server_id = %target.id, "Joining in-flight query");

        let _ = rx.changed().await;
        let published = rx.borrow().clone();
        match published {
            Some(result) => (*result).clone(),
            None => self.inner.offline(target, "query aborted"),
        }
    }

    async fn query_as_leader(&self, target: &ServerTarget) -> ServerStatusResult {
        let inner = Arc::clone(&self.inner);
        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inner.inflight),
            key: Arc::clone(&target.id),
        };
        let owned = target.clone();

        let handle = tokio::spawn(async move {
            let result = inner.run(&owned).await;
            if let Some((_, tx)) = inner.inflight.remove(&owned.id) {
                let _ = tx.send(Some(Arc::new(result.clone())));
            }
            drop(guard);
            result
        });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!(server_id = %target.id, error = %e, "Query task failed");
                self.inner.offline(target, "query aborted")
            }
        }
    }
}

impl PoolInner {
    async fn run(&self, target: &ServerTarget) -> ServerStatusResult {
        let permit = {
            let _queued = CounterGuard::enter(&self.queued);
            self.permits.acquire().await
        };
        let Ok(_permit) = permit else {
            return self.offline(target, "query pool is shutting down");
        };
        let _running = CounterGuard::enter(&self.running);

        let deadline = self.options.overall_deadline();
        let outcome = tokio::time::timeout(deadline, self.query.query(target, &self.options)).await;
        let query_time = self.clock.now_ms();

        match outcome {
            Ok(Ok(state)) => {
                debug!(server_id = %target.id, players = state.players.len(), "Server online");
                ServerStatusResult::online(target, state, query_time)
            }
            Ok(Err(e)) => {
                debug!(server_id = %target.id, error = %e, "Server offline");
                ServerStatusResult::offline(target, &e.to_string(), query_time)
            }
            Err(_) => {
                let e = DomainError::QueryTimeout {
                    server: target.address(),
                    timeout_ms: deadline.as_millis() as u64,
                };
                debug!(server_id = %target.id, error = %e, "Server query exceeded deadline");
                ServerStatusResult::offline(target, &e.to_string(), query_time)
            }
        }
    }

    fn offline(&self, target: &ServerTarget, reason: &str) -> ServerStatusResult {
        ServerStatusResult::offline(target, reason, self.clock.now_ms())
    }
}

#[async_trait]
impl BackgroundQueryPort for QueryWorkerPool {
    async fn query_in_background(
        &self,
        target: &ServerTarget,
    ) -> Result<QueryCompletion, DomainError> {
        if target.host.trim().is_empty() || target.port == 0 {
            return Err(DomainError::InvalidServerTarget(format!(
                "{} has no usable address ({})",
                target.id,
                target.address()
            )));
        }

        let (is_leader, rx) = self.register_or_join_inflight(&target.id);

        let result = if is_leader {
            self.query_as_leader(target).await
        } else {
            self.query_as_follower(target, rx).await
        };

        Ok(QueryCompletion {
            result,
            joined_in_flight: !is_leader,
        })
    }

    fn status(&self) -> QueryPoolStatus {
        QueryWorkerPool::status(self)
    }
}
