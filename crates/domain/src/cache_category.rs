use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheCategory {
    ServerStatus,
    Leaderboard,
    PlayerSearch,
    SeasonalLeaderboard,
    DatabaseStatus,
    Donors,
    SteamProfiles,
    Default,
}

impl CacheCategory {
    pub fn default_ttl_secs(&self) -> u64 {
        match self {
            CacheCategory::ServerStatus => 30,
            CacheCategory::Leaderboard => 10,
            CacheCategory::PlayerSearch => 10,
            CacheCategory::SeasonalLeaderboard => 10,
            CacheCategory::DatabaseStatus => 5,
            CacheCategory::Donors => 30,
            CacheCategory::SteamProfiles => 3600,
            CacheCategory::Default => 30,
        }
    }
}

/// TTL per cache category, in seconds, as stored in the settings document.
///
/// A zero or missing value means "use the category default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheIntervals {
    #[serde(default)]
    pub server_status_interval: Option<u64>,
    #[serde(default)]
    pub leaderboard_interval: Option<u64>,
    #[serde(default)]
    pub player_search_interval: Option<u64>,
    #[serde(default)]
    pub seasonal_leaderboard_interval: Option<u64>,
    #[serde(default)]
    pub database_status_interval: Option<u64>,
    #[serde(default)]
    pub donors_interval: Option<u64>,
    #[serde(default)]
    pub steam_profiles_interval: Option<u64>,
}

impl CacheIntervals {
    pub fn ttl_for(&self, category: CacheCategory) -> u64 {
        let configured = match category {
            CacheCategory::ServerStatus => self.server_status_interval,
            CacheCategory::Leaderboard => self.leaderboard_interval,
            CacheCategory::PlayerSearch => self.player_search_interval,
            CacheCategory::SeasonalLeaderboard => self.seasonal_leaderboard_interval,
            CacheCategory::DatabaseStatus => self.database_status_interval,
            CacheCategory::Donors => self.donors_interval,
            CacheCategory::SteamProfiles => self.steam_profiles_interval,
            CacheCategory::Default => None,
        };

        configured
            .filter(|&ttl| ttl > 0)
            .unwrap_or_else(|| category.default_ttl_secs())
    }
}
