use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Data type that clears the whole cache instead of matching a pattern.
pub const ALL_DATA_TYPE: &str = "all";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds between sweeps of expired entries.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Data type name -> key pattern used by the admin force-refresh action.
    #[serde(default = "default_invalidation")]
    pub invalidation: BTreeMap<String, String>,
}

impl CacheConfig {
    pub fn pattern_for(&self, data_type: &str) -> Option<&str> {
        self.invalidation.get(data_type).map(String::as_str)
    }

    /// Every accepted data type, including `all`.
    pub fn data_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.invalidation.keys().cloned().collect();
        types.push(ALL_DATA_TYPE.to_string());
        types
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            invalidation: default_invalidation(),
        }
    }
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_invalidation() -> BTreeMap<String, String> {
    [
        ("servers", "^server_status"),
        ("leaderboard", "leaderboard"),
        ("database", "^db_"),
        ("donors", "donors"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
