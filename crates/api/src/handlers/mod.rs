pub mod cache;
pub mod health;
pub mod query_pool;
pub mod server_status;

pub use health::health_check;
