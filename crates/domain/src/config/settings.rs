use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsConfig {
    /// JSON settings document edited from the admin panel.
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    "data/settings.json".to_string()
}
