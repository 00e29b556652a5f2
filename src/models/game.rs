use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a team as seen in one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Upstream team ID
    pub id: i64,

    /// Team name (e.g. "Celtics")
    pub name: String,

    /// Team city (e.g. "Boston")
    pub city: String,

    /// Short code (e.g. "BOS")
    pub abbreviation: String,

    /// Current score
    pub score: i64,
}

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Final,
}

impl GameStatus {
    /// Position in the served list: live games first, then upcoming, then finished
    pub fn sort_priority(&self) -> u8 {
        match self {
            GameStatus::InProgress => 0,
            GameStatus::Scheduled => 1,
            GameStatus::Final => 2,
        }
    }
}

/// Canonical game, independent of the upstream record shape it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Game ID (unique within one day's slate)
    pub id: i64,

    pub status: GameStatus,

    /// Display text: "7:30 PM ET", "3rd 4:32", "Final", "TBD"
    pub status_text: String,

    /// Current period, 0 before tip-off
    pub period: i64,

    /// Clock in the current period (only while in progress)
    pub time_remaining: Option<String>,

    pub home_team: Team,

    pub away_team: Team,

    /// Scheduled tip-off, when upstream provides one
    pub start_time: Option<DateTime<Utc>>,
}

/// Envelope served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameListResponse {
    /// Games ordered live, scheduled, final
    pub games: Vec<Game>,

    /// When the games were fetched from upstream (not when they were served)
    pub last_updated: DateTime<Utc>,
}

impl GameListResponse {
    pub fn new(games: Vec<Game>, last_updated: DateTime<Utc>) -> Self {
        Self {
            games,
            last_updated,
        }
    }

    /// Number of games in the given state
    pub fn count(&self, status: GameStatus) -> usize {
        self.games.iter().filter(|g| g.status == status).count()
    }
}

/// Shared handle to a response; the cache and every caller of a fresh hit see the same value
pub type SharedGameList = Arc<GameListResponse>;

/// Stable sort by status priority, preserving upstream order within a status
pub fn sort_games(games: &mut [Game]) {
    games.sort_by_key(|g| g.status.sort_priority());
}
