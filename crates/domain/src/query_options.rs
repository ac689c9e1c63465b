use std::time::Duration;

const MAX_SOCKET_TIMEOUT_MS: u64 = 3000;

/// Timeouts and retry budget for a single server query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub attempt_timeout_ms: u64,
    pub socket_timeout_ms: u64,
    pub max_attempts: u32,
}

impl QueryOptions {
    /// Socket timeout is capped at the attempt timeout.
    pub fn new(attempt_timeout_ms: u64, socket_timeout_ms: u64, max_attempts: u32) -> Self {
        Self {
            attempt_timeout_ms,
            socket_timeout_ms: socket_timeout_ms.min(attempt_timeout_ms),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn socket_timeout(&self) -> Duration {
        Duration::from_millis(self.socket_timeout_ms)
    }

    /// Upper bound for all attempts together.
    pub fn overall_deadline(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms.saturating_mul(self.max_attempts as u64))
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new(5000, MAX_SOCKET_TIMEOUT_MS, 2)
    }
}
