use serde::{Deserialize, Serialize};

use super::cache::{CacheConfig, ALL_DATA_TYPE};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::query::QueryConfig;
use super::registry::RegistryConfig;
use super::server::ServerConfig;
use super::settings::SettingsConfig;

/// Main configuration structure for Serverwatch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Web server configuration (port, bind address, admin key)
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound game-server query configuration
    #[serde(default)]
    pub query: QueryConfig,

    /// Status cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Server registry source
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Admin settings document (cache intervals)
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. serverwatch.toml in current directory
    /// 3. /etc/serverwatch/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("serverwatch.toml").exists() {
            Self::from_file("serverwatch.toml")?
        } else if std::path::Path::new("/etc/serverwatch/config.toml").exists() {
            Self::from_file("/etc/serverwatch/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.servers_path {
            self.registry.path = path;
        }
        if let Some(path) = overrides.settings_path {
            self.settings.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        if self.query.max_concurrent == 0 {
            return Err(ConfigError::Validation(
                "query.max_concurrent must be at least 1".to_string(),
            ));
        }

        if self.query.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "query.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.query.attempt_timeout_ms == 0 || self.query.socket_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query timeouts must be greater than 0".to_string(),
            ));
        }

        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.sweep_interval_secs must be greater than 0".to_string(),
            ));
        }

        for (data_type, pattern) in &self.cache.invalidation {
            if data_type == ALL_DATA_TYPE {
                return Err(ConfigError::Validation(format!(
                    "cache.invalidation cannot redefine the reserved data type '{}'",
                    ALL_DATA_TYPE
                )));
            }
            fancy_regex::Regex::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid invalidation pattern for '{}': {}",
                    data_type, e
                ))
            })?;
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub servers_path: Option<String>,
    pub settings_path: Option<String>,
    pub log_level: Option<String>,
}
