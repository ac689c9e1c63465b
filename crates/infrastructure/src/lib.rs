//! Serverwatch Infrastructure Layer
pub mod cache;
pub mod query;
pub mod registry;
pub mod settings;
