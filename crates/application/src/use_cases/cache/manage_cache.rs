use crate::ports::CacheAdminPort;
use serverwatch_domain::config::cache::ALL_DATA_TYPE;
use serverwatch_domain::config::CacheConfig;
use serverwatch_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

const SUPPORTED_ACTIONS: &str = "clear, clearPattern, cleanup, forceRefresh";

/// An administrative cache operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheAction {
    /// Deletes one key, or everything when `key` is `None`.
    Clear { key: Option<String> },
    ClearPattern { pattern: String },
    Cleanup,
    ForceRefresh { data_type: String },
}

impl CacheAction {
    /// Builds an action from its wire name and optional fields.
    pub fn from_parts(
        action: &str,
        key: Option<String>,
        pattern: Option<String>,
        data_type: Option<String>,
    ) -> Result<Self, DomainError> {
        match action {
            "clear" => Ok(Self::Clear {
                key: key.filter(|k| !k.is_empty()),
            }),
            "clearPattern" => pattern
                .filter(|p| !p.is_empty())
                .map(|pattern| Self::ClearPattern { pattern })
                .ok_or_else(|| {
                    DomainError::MissingField(
                        "pattern is required for clearPattern action".to_string(),
                    )
                }),
            "cleanup" => Ok(Self::Cleanup),
            "forceRefresh" => data_type
                .filter(|d| !d.is_empty())
                .map(|data_type| Self::ForceRefresh { data_type })
                .ok_or_else(|| {
                    DomainError::MissingField(
                        "dataType is required for forceRefresh action".to_string(),
                    )
                }),
            other => Err(DomainError::InvalidCacheAction(format!(
                "'{}'. Supported actions: {}",
                other, SUPPORTED_ACTIONS
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheActionOutcome {
    Deleted { key: String, deleted: bool },
    Cleared { cleared: usize },
    ClearedPattern { pattern: String, cleared: usize },
    Cleaned { cleaned: usize },
    ForceRefreshed { data_type: String, cleared: usize },
}

impl CacheActionOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Deleted { key, deleted: true } => format!("Cache cleared for key: {}", key),
            Self::Deleted { key, deleted: false } => format!("Cache key not found: {}", key),
            Self::Cleared { cleared } => {
                format!("Cleared all cache entries: {} items removed", cleared)
            }
            Self::ClearedPattern { pattern, cleared } => format!(
                "Cleared {} cache entries matching pattern: {}",
                cleared, pattern
            ),
            Self::Cleaned { cleaned } => format!("Cleaned up {} expired cache entries", cleaned),
            Self::ForceRefreshed { data_type, cleared } => format!(
                "Force refreshed {} cache: {} entries cleared",
                data_type, cleared
            ),
        }
    }
}

pub struct ManageCacheUseCase {
    cache: Arc<dyn CacheAdminPort>,
    config: CacheConfig,
}

impl ManageCacheUseCase {
    pub fn new(cache: Arc<dyn CacheAdminPort>, config: CacheConfig) -> Self {
        Self { cache, config }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, action: CacheAction) -> Result<CacheActionOutcome, DomainError> {
        let outcome = match action {
            CacheAction::Clear { key: Some(key) } => {
                let deleted = self.cache.delete(&key);
                CacheActionOutcome::Deleted { key, deleted }
            }
            CacheAction::Clear { key: None } => CacheActionOutcome::Cleared {
                cleared: self.cache.clear(),
            },
            CacheAction::ClearPattern { pattern } => {
                let cleared = self.cache.delete_by_pattern(&pattern)?;
                CacheActionOutcome::ClearedPattern { pattern, cleared }
            }
            CacheAction::Cleanup => CacheActionOutcome::Cleaned {
                cleaned: self.cache.sweep_expired(),
            },
            CacheAction::ForceRefresh { data_type } => {
                let cleared = self.force_refresh(&data_type)?;
                CacheActionOutcome::ForceRefreshed { data_type, cleared }
            }
        };

        info!(outcome = %outcome.message(), "Cache action applied");
        Ok(outcome)
    }

    fn force_refresh(&self, data_type: &str) -> Result<usize, DomainError> {
        if data_type == ALL_DATA_TYPE {
            return Ok(self.cache.clear());
        }

        match self.config.pattern_for(data_type) {
            Some(pattern) => self.cache.delete_by_pattern(pattern),
            None => Err(DomainError::InvalidDataType(format!(
                "'{}'. Must be one of: {}",
                data_type,
                self.config.data_types().join(", ")
            ))),
        }
    }
}
