mod background_query;
mod cache_admin_port;
mod cache_maintenance_port;
mod cache_settings;
mod cache_store;
mod server_query;
mod server_registry;

pub use background_query::{BackgroundQueryPort, QueryCompletion, QueryPoolStatus};
pub use cache_admin_port::{CacheAdminPort, CacheEntryStats, CacheStats};
pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use cache_settings::CacheSettingsPort;
pub use cache_store::CacheStore;
pub use server_query::ServerQueryPort;
pub use server_registry::ServerRegistryPort;

// Re-export for convenience
pub use serverwatch_domain::{CacheEntry, ServerStatusResult, ServerTarget};
