use async_trait::async_trait;
use serverwatch_domain::{DomainError, ServerTarget};

#[async_trait]
pub trait ServerRegistryPort: Send + Sync {
    /// Loads the full list of monitored servers.
    async fn load_servers(&self) -> Result<Vec<ServerTarget>, DomainError>;
}
