use serde::{Deserialize, Serialize};

use crate::QueryOptions;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Maximum simultaneous outbound queries.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,

    #[serde(default = "default_socket_timeout_ms")]
    pub socket_timeout_ms: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl QueryConfig {
    pub fn options(&self) -> QueryOptions {
        QueryOptions::new(
            self.attempt_timeout_ms,
            self.socket_timeout_ms,
            self.max_attempts,
        )
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            socket_timeout_ms: default_socket_timeout_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_max_concurrent() -> usize {
    3
}

fn default_attempt_timeout_ms() -> u64 {
    5000
}

fn default_socket_timeout_ms() -> u64 {
    3000
}

fn default_max_attempts() -> u32 {
    2
}
