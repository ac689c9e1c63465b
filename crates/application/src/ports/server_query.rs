use async_trait::async_trait;
use serverwatch_domain::{DomainError, GameServerState, QueryOptions, ServerTarget};

/// Network query primitive for a single game server.
#[async_trait]
pub trait ServerQueryPort: Send + Sync {
    async fn query(
        &self,
        target: &ServerTarget,
        options: &QueryOptions,
    ) -> Result<GameServerState, DomainError>;
}
