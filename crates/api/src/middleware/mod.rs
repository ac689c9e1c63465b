mod admin_key;

pub use admin_key::{require_admin_key, timing_safe_eq};
