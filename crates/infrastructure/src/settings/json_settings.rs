use async_trait::async_trait;
use serde::Deserialize;
use serverwatch_application::ports::CacheSettingsPort;
use serverwatch_domain::{CacheIntervals, DomainError};
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    cache: CacheIntervals,
}

/// Reads cache intervals from the admin settings document.
///
/// A missing file means "no overrides"; an unreadable or malformed one is an
/// error so the caller can log it before falling back.
pub struct JsonCacheSettings {
    path: PathBuf,
}

impl JsonCacheSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(contents: &str) -> Result<CacheIntervals, DomainError> {
        serde_json::from_str::<SettingsDocument>(contents)
            .map(|document| document.cache)
            .map_err(|e| DomainError::ConfigError(format!("invalid settings document: {}", e)))
    }
}

#[async_trait]
impl CacheSettingsPort for JsonCacheSettings {
    async fn load_intervals(&self) -> Result<CacheIntervals, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(CacheIntervals::default()),
            Err(e) => Err(DomainError::IoError(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
