use serde::{Deserialize, Serialize};
use serverwatch_application::use_cases::ServerStatusView;
use serverwatch_domain::{CacheInfo, ServerStatusResult};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusQuery {
    pub server_id: Option<String>,
    pub force: Option<String>,
}

impl ServerStatusQuery {
    pub fn force_refresh(&self) -> bool {
        matches!(self.force.as_deref(), Some("true") | Some("1"))
    }

    pub fn server_id(&self) -> Option<&str> {
        self.server_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ServerStatusResponse {
    pub server: ServerStatusResult,
    pub cache: CacheInfo,
}

impl From<ServerStatusView> for ServerStatusResponse {
    fn from(view: ServerStatusView) -> Self {
        Self {
            server: view.server,
            cache: view.cache,
        }
    }
}

/// A status result with its cache metadata inlined.
#[derive(Serialize, Debug, Clone)]
pub struct ServerStatusEntry {
    #[serde(flatten)]
    pub server: ServerStatusResult,
    pub cache: CacheInfo,
}

impl From<ServerStatusView> for ServerStatusEntry {
    fn from(view: ServerStatusView) -> Self {
        Self {
            server: view.server,
            cache: view.cache,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ServerStatusBatchResponse {
    pub servers: Vec<ServerStatusEntry>,
}
