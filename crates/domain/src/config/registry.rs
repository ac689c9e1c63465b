use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// JSON document holding `{ "servers": [...] }`.
    #[serde(default = "default_servers_path")]
    pub path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_servers_path(),
        }
    }
}

fn default_servers_path() -> String {
    "data/servers.json".to_string()
}
