//! Serverwatch Domain Layer
pub mod cache_category;
pub mod cache_entry;
pub mod cache_key;
pub mod config;
pub mod errors;
pub mod query_options;
pub mod server_status;
pub mod server_target;

pub use cache_category::{CacheCategory, CacheIntervals};
pub use cache_entry::{CacheEntry, CacheInfo, CacheSource};
pub use cache_key::server_status_key;
pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use query_options::QueryOptions;
pub use server_status::{GameServerState, PlayerInfo, RawPlayer, ServerStatus, ServerStatusResult};
pub use server_target::ServerTarget;
