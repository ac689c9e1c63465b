mod json_settings;

pub use json_settings::JsonCacheSettings;
