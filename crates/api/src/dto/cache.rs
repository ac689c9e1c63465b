use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serverwatch_application::use_cases::CacheActionOutcome;

/// `{ "success": true, "data": ... }` wrapper used by the admin routes.
#[derive(Serialize, Debug, Clone)]
pub struct AdminEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> AdminEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CacheActionRequest {
    pub action: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheActionResponse {
    pub success: bool,
    pub data: Value,
    pub message: String,
}

impl From<CacheActionOutcome> for CacheActionResponse {
    fn from(outcome: CacheActionOutcome) -> Self {
        let message = outcome.message();
        let data = match outcome {
            CacheActionOutcome::Deleted { key, deleted } => json!({ "deleted": deleted, "key": key }),
            CacheActionOutcome::Cleared { cleared } => json!({ "cleared": cleared }),
            CacheActionOutcome::ClearedPattern { pattern, cleared } => {
                json!({ "cleared": cleared, "pattern": pattern })
            }
            CacheActionOutcome::Cleaned { cleaned } => json!({ "cleaned": cleaned }),
            CacheActionOutcome::ForceRefreshed { data_type, cleared } => {
                json!({ "cleared": cleared, "dataType": data_type })
            }
        };

        Self {
            success: true,
            data,
            message,
        }
    }
}
