pub mod cache;
pub mod errors;
pub mod logging;
pub mod query;
pub mod registry;
pub mod root;
pub mod server;
pub mod settings;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use query::QueryConfig;
pub use registry::RegistryConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use settings::SettingsConfig;
