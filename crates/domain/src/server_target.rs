use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A monitored game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTarget {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub host: Arc<str>,
    pub port: u16,
    pub location: Arc<str>,
    pub connect_url: Arc<str>,
    #[serde(default)]
    pub coming_soon: bool,
}

impl ServerTarget {
    pub fn new(
        id: Arc<str>,
        name: Arc<str>,
        host: Arc<str>,
        port: u16,
        location: Arc<str>,
        connect_url: Arc<str>,
        coming_soon: bool,
    ) -> Self {
        Self {
            id,
            name,
            host,
            port,
            location,
            connect_url,
            coming_soon,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Collects every violated rule so the admin editor can report them together.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push("ID is required and must be a non-empty string".to_string());
        }
        if self.name.trim().is_empty() {
            errors.push("Name is required and must be a non-empty string".to_string());
        }
        if self.host.trim().is_empty() {
            errors.push("Host is required and must be a non-empty string".to_string());
        }
        if self.port == 0 {
            errors.push("Port is required and must be a valid port number (1-65535)".to_string());
        }
        if self.location.trim().is_empty() {
            errors.push("Location is required and must be a non-empty string".to_string());
        }
        if self.connect_url.trim().is_empty() {
            errors.push("Connect URL is required and must be a non-empty string".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Registry used when the configured server list cannot be read.
    pub fn builtin_registry() -> Vec<ServerTarget> {
        vec![
            ServerTarget::new(
                Arc::from("main"),
                Arc::from("𝘴𝘢𝘬𝘢 Dodgeball Server"),
                Arc::from("45.81.234.145"),
                27015,
                Arc::from("🇩🇪 Frankfurt"),
                Arc::from("steam://connect/45.81.234.145:27015"),
                false,
            ),
            ServerTarget::new(
                Arc::from("advanced"),
                Arc::from("𝘴𝘢𝘬𝘢 Dodgeball Server - Advanced"),
                Arc::from("37.114.54.74"),
                27015,
                Arc::from("🇩🇪 Frankfurt"),
                Arc::from("steam://connect/37.114.54.74:27015"),
                true,
            ),
        ]
    }
}
