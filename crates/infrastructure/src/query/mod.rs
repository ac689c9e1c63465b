pub mod a2s;
mod source_query;
mod worker_pool;

pub use source_query::SourceQueryClient;
pub use worker_pool::QueryWorkerPool;
