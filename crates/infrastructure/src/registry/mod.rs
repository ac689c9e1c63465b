mod json_registry;

pub use json_registry::JsonServerRegistry;
