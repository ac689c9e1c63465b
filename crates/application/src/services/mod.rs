mod cache_ttl_service;

pub use cache_ttl_service::CacheTtlService;
