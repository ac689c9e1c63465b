use async_trait::async_trait;
use serde::Serialize;
use serverwatch_domain::{DomainError, ServerStatusResult, ServerTarget};

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryPoolStatus {
    pub running_queries: usize,
    pub max_concurrent: usize,
    pub queued_queries: usize,
    pub active_queries: usize,
}

/// Result of a background query as seen by one caller.
#[derive(Debug, Clone)]
pub struct QueryCompletion {
    pub result: ServerStatusResult,
    /// True when this caller attached to a query another caller started.
    pub joined_in_flight: bool,
}

/// Bounded, deduplicating executor for server queries.
#[async_trait]
pub trait BackgroundQueryPort: Send + Sync {
    /// Resolves to `online` or `offline`. Only a malformed target is an error.
    async fn query_in_background(
        &self,
        target: &ServerTarget,
    ) -> Result<QueryCompletion, DomainError>;

    fn status(&self) -> QueryPoolStatus;
}
