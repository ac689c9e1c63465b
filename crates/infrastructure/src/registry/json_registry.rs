use async_trait::async_trait;
use serde::Deserialize;
use serverwatch_application::ports::ServerRegistryPort;
use serverwatch_domain::{DomainError, ServerTarget};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    servers: Vec<serde_json::Value>,
}

/// Server registry backed by a JSON document, re-read on every call.
///
/// Entries that fail to deserialize or validate are skipped.
pub struct JsonServerRegistry {
    path: PathBuf,
}

impl JsonServerRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(contents: &str) -> Result<Vec<ServerTarget>, DomainError> {
        let document: RegistryDocument = serde_json::from_str(contents)
            .map_err(|e| DomainError::RegistryError(format!("invalid registry document: {}", e)))?;

        let targets = document
            .servers
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let target: ServerTarget = match serde_json::from_value(raw) {
                    Ok(target) => target,
                    Err(e) => {
                        warn!(index, error = %e, "Skipping unreadable server entry");
                        return None;
                    }
                };
                match target.validate() {
                    Ok(()) => Some(target),
                    Err(problems) => {
                        warn!(
                            index,
                            server_id = %target.id,
                            problems = %problems.join("; "),
                            "Skipping invalid server entry"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(targets)
    }
}

#[async_trait]
impl ServerRegistryPort for JsonServerRegistry {
    async fn load_servers(&self) -> Result<Vec<ServerTarget>, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::RegistryError(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let targets = Self::parse(&contents)?;
        debug!(path = %self.path.display(), servers = targets.len(), "Loaded server registry");
        Ok(targets)
    }
}
