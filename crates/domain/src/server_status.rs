use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ServerTarget;

pub const UNKNOWN_MAP: &str = "Unknown";
pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const DEFAULT_MAX_PLAYERS: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Offline,
    Checking,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Online => "online",
            ServerStatus::Offline => "offline",
            ServerStatus::Checking => "checking",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub name: String,
    pub score: i64,
    pub connected_seconds: f64,
}

/// A player as reported by the query protocol, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlayer {
    pub name: Option<String>,
    pub score: Option<i64>,
    pub connected_seconds: Option<f64>,
}

/// Raw state returned by a successful protocol query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameServerState {
    pub name: Option<String>,
    pub map: Option<String>,
    pub max_players: Option<u32>,
    pub players: Vec<RawPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusResult {
    pub id: Arc<str>,
    pub status: ServerStatus,
    pub name: String,
    pub map: String,
    pub max_players: u32,
    pub players: Vec<PlayerInfo>,
    pub location: Arc<str>,
    pub connect_url: Arc<str>,
    pub coming_soon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_time: Option<u64>,
}

impl ServerStatusResult {
    pub fn online(target: &ServerTarget, state: GameServerState, query_time: u64) -> Self {
        let players = state
            .players
            .into_iter()
            .map(|p| PlayerInfo {
                name: p
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                score: p.score.unwrap_or(0),
                connected_seconds: p.connected_seconds.unwrap_or(0.0),
            })
            .collect();

        Self {
            status: ServerStatus::Online,
            name: state
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| target.name.to_string()),
            map: state
                .map
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_MAP.to_string()),
            max_players: state
                .max_players
                .filter(|&m| m > 0)
                .unwrap_or(DEFAULT_MAX_PLAYERS),
            players,
            error: None,
            query_time: Some(query_time),
            ..Self::base(target)
        }
    }

    pub fn offline(target: &ServerTarget, reason: &str, query_time: u64) -> Self {
        Self {
            status: ServerStatus::Offline,
            error: Some(format!("Server offline: {}", reason)),
            query_time: Some(query_time),
            ..Self::base(target)
        }
    }

    /// Placeholder returned while a background query is pending. Never cached.
    pub fn checking(target: &ServerTarget) -> Self {
        Self::base(target)
    }

    fn base(target: &ServerTarget) -> Self {
        Self {
            id: Arc::clone(&target.id),
            status: ServerStatus::Checking,
            name: target.name.to_string(),
            map: UNKNOWN_MAP.to_string(),
            max_players: DEFAULT_MAX_PLAYERS,
            players: Vec::new(),
            location: Arc::clone(&target.location),
            connect_url: Arc::clone(&target.connect_url),
            coming_soon: target.coming_soon,
            error: None,
            query_time: None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
