use async_trait::async_trait;
use serverwatch_application::ports::ServerQueryPort;
use serverwatch_domain::{
    DomainError, GameServerState, QueryOptions, RawPlayer, ServerTarget,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Query port that sleeps, then succeeds or fails, and records concurrency.
pub struct MockServerQuery {
    delay: Duration,
    calls: AtomicUsize,
    running: AtomicUsize,
    max_observed: AtomicUsize,
    should_fail: RwLock<bool>,
}

impl MockServerQuery {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
            running: AtomicUsize::new(0),
            max_observed: AtomicUsize::new(0),
            should_fail: RwLock::new(false),
        }
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_observed_concurrency(&self) -> usize {
        self.max_observed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServerQueryPort for MockServerQuery {
    async fn query(
        &self,
        target: &ServerTarget,
        _options: &QueryOptions,
    ) -> Result<GameServerState, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_observed.fetch_max(now_running, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        self.running.fetch_sub(1, Ordering::SeqCst);

        if *self.should_fail.read().await {
            return Err(DomainError::ConnectionRefused {
                server: target.address(),
            });
        }

        Ok(GameServerState {
            name: Some(format!("{} live", target.id)),
            map: Some("pl_upward".to_string()),
            max_players: Some(24),
            players: vec![RawPlayer {
                name: Some("medic".to_string()),
                score: Some(3),
                connected_seconds: Some(10.0),
            }],
        })
    }
}
