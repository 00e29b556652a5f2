use chrono::{DateTime, Utc};

use crate::api::records::{RawBoxScore, RawGame, RawTeam};
use crate::models::{Game, GameStatus, Team};
use crate::transform::status::{in_progress_text, parse_datetime, parse_status, scheduled_text};

/// What canonicalization needs to read from an upstream record
pub trait GameRecord {
    /// Resolved game ID
    fn game_id(&self) -> i64;
    fn status(&self) -> Option<&str>;
    fn period(&self) -> Option<i64>;
    fn clock(&self) -> Option<&str>;
    fn datetime(&self) -> Option<&str>;
    fn home(&self) -> (Option<&RawTeam>, Option<i64>);
    fn away(&self) -> (Option<&RawTeam>, Option<i64>);
}

impl GameRecord for RawGame {
    fn game_id(&self) -> i64 {
        self.id.unwrap_or(0)
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn period(&self) -> Option<i64> {
        self.period
    }

    fn clock(&self) -> Option<&str> {
        self.time.as_deref()
    }

    fn datetime(&self) -> Option<&str> {
        self.datetime.as_deref()
    }

    fn home(&self) -> (Option<&RawTeam>, Option<i64>) {
        (self.home_team.as_ref(), self.home_team_score)
    }

    fn away(&self) -> (Option<&RawTeam>, Option<i64>) {
        (self.visitor_team.as_ref(), self.visitor_team_score)
    }
}

impl GameRecord for RawBoxScore {
    /// Box scores often lack an ID; derive one from the two teams
    fn game_id(&self) -> i64 {
        match self.id {
            Some(id) if id != 0 => id,
            _ => matchup_id(
                team_id(self.home_team.as_ref()),
                team_id(self.visitor_team.as_ref()),
            ),
        }
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn period(&self) -> Option<i64> {
        self.period
    }

    fn clock(&self) -> Option<&str> {
        self.time.as_deref()
    }

    fn datetime(&self) -> Option<&str> {
        self.datetime.as_deref()
    }

    fn home(&self) -> (Option<&RawTeam>, Option<i64>) {
        (self.home_team.as_ref(), self.home_team_score)
    }

    fn away(&self) -> (Option<&RawTeam>, Option<i64>) {
        (self.visitor_team.as_ref(), self.visitor_team_score)
    }
}

/// Deterministic ID for a home/visitor pairing: home ID in the high 32 bits
pub fn matchup_id(home_id: i64, visitor_id: i64) -> i64 {
    (home_id << 32) | (visitor_id & 0xFFFF_FFFF)
}

pub fn from_box_score(record: &RawBoxScore) -> Game {
    canonicalize(record)
}

pub fn from_game(record: &RawGame) -> Game {
    canonicalize(record)
}

/// Build the canonical game from any record shape
pub fn canonicalize<R: GameRecord>(record: &R) -> Game {
    let status = parse_status(record.status().unwrap_or_default());
    let period = record.period().unwrap_or(0).max(0);
    let clock = record.clock().map(str::trim).unwrap_or_default();
    let start_time = start_time(record);

    let status_text = match status {
        GameStatus::Final => "Final".to_string(),
        GameStatus::InProgress => in_progress_text(period, clock),
        GameStatus::Scheduled => scheduled_text(start_time),
    };

    let time_remaining = (status == GameStatus::InProgress && !clock.is_empty())
        .then(|| clock.to_string());

    let (home_raw, home_score) = record.home();
    let (away_raw, away_score) = record.away();

    Game {
        id: record.game_id(),
        status,
        status_text,
        period,
        time_remaining,
        home_team: team(home_raw, home_score),
        away_team: team(away_raw, away_score),
        start_time,
    }
}

/// Tip-off from the datetime field, else from the status field (upstream
/// puts the scheduled time there for games that have not started)
pub fn start_time<R: GameRecord>(record: &R) -> Option<DateTime<Utc>> {
    parse_datetime(record.datetime()).or_else(|| parse_datetime(record.status()))
}

fn team_id(raw: Option<&RawTeam>) -> i64 {
    raw.and_then(|t| t.id).unwrap_or(0)
}

fn team(raw: Option<&RawTeam>, score: Option<i64>) -> Team {
    let raw = raw.cloned().unwrap_or_default();

    Team {
        id: raw.id.unwrap_or(0),
        name: raw.name.unwrap_or_default(),
        city: raw.city.unwrap_or_default(),
        abbreviation: raw.abbreviation.unwrap_or_default(),
        score: score.unwrap_or(0).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_team(id: i64, city: &str, name: &str, abbreviation: &str) -> RawTeam {
        RawTeam {
            id: Some(id),
            name: Some(name.to_string()),
            city: Some(city.to_string()),
            abbreviation: Some(abbreviation.to_string()),
            ..Default::default()
        }
    }

    fn celtics() -> RawTeam {
        raw_team(2, "Boston", "Celtics", "BOS")
    }

    fn lakers() -> RawTeam {
        raw_team(14, "Los Angeles", "Lakers", "LAL")
    }

    #[test]
    fn test_live_box_score() {
        let record = RawBoxScore {
            status: Some("3rd Qtr".to_string()),
            period: Some(3),
            time: Some("4:32".to_string()),
            home_team: Some(celtics()),
            visitor_team: Some(lakers()),
            home_team_score: Some(78),
            visitor_team_score: Some(71),
            ..Default::default()
        };

        let game = from_box_score(&record);

        assert_eq!(game.status, GameStatus::InProgress);
        assert_eq!(game.status_text, "3rd 4:32");
        assert_eq!(game.period, 3);
        assert_eq!(game.time_remaining.as_deref(), Some("4:32"));
        assert_eq!(game.home_team.abbreviation, "BOS");
        assert_eq!(game.home_team.score, 78);
        assert_eq!(game.away_team.city, "Los Angeles");
        assert_eq!(game.away_team.score, 71);
    }

    #[test]
    fn test_double_overtime() {
        let record = RawBoxScore {
            status: Some("OT".to_string()),
            period: Some(6),
            time: Some("1:10".to_string()),
            ..Default::default()
        };

        let game = from_box_score(&record);

        assert_eq!(game.status, GameStatus::InProgress);
        assert_eq!(game.status_text, "OT2 1:10");
    }

    #[test]
    fn test_halftime_without_clock() {
        let record = RawGame {
            id: Some(5),
            status: Some("Halftime".to_string()),
            period: Some(2),
            time: Some(" ".to_string()),
            ..Default::default()
        };

        let game = from_game(&record);

        assert_eq!(game.status_text, "2nd");
        assert!(game.time_remaining.is_none());
    }

    #[test]
    fn test_final_game_drops_clock() {
        let record = RawGame {
            id: Some(9),
            status: Some("Final".to_string()),
            period: Some(4),
            time: Some("Final".to_string()),
            home_team_score: Some(110),
            visitor_team_score: Some(104),
            ..Default::default()
        };

        let game = from_game(&record);

        assert_eq!(game.status, GameStatus::Final);
        assert_eq!(game.status_text, "Final");
        assert!(game.time_remaining.is_none());
        assert_eq!(game.home_team.score, 110);
    }

    #[test]
    fn test_scheduled_game_reads_datetime() {
        let record = RawGame {
            id: Some(1037593),
            status: Some("Scheduled".to_string()),
            datetime: Some("2024-01-15T19:30:00Z".to_string()),
            ..Default::default()
        };

        let game = from_game(&record);

        assert_eq!(game.status, GameStatus::Scheduled);
        assert_eq!(game.status_text, "2:30 PM ET");
        assert_eq!(
            game.start_time,
            Some("2024-01-15T19:30:00Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn test_scheduled_game_falls_back_to_status_timestamp() {
        let record = RawGame {
            id: Some(1),
            status: Some("2024-01-16T00:30:00Z".to_string()),
            period: Some(0),
            ..Default::default()
        };

        let game = from_game(&record);

        assert_eq!(game.status, GameStatus::Scheduled);
        assert_eq!(game.status_text, "7:30 PM ET");
        assert!(game.start_time.is_some());
    }

    #[test]
    fn test_scheduled_box_score_without_time_is_tbd() {
        let record = RawBoxScore {
            status: Some("Scheduled".to_string()),
            ..Default::default()
        };

        let game = from_box_score(&record);

        assert_eq!(game.status_text, "TBD");
        assert!(game.start_time.is_none());
    }

    #[test]
    fn test_empty_record_degrades_to_defaults() {
        let game = from_game(&RawGame::default());

        assert_eq!(game.id, 0);
        assert_eq!(game.status, GameStatus::Scheduled);
        assert_eq!(game.status_text, "TBD");
        assert_eq!(game.period, 0);
        assert_eq!(game.home_team.id, 0);
        assert_eq!(game.home_team.name, "");
        assert_eq!(game.away_team.score, 0);
    }

    #[test]
    fn test_box_score_id_fallback_is_deterministic() {
        let record = RawBoxScore {
            home_team: Some(celtics()),
            visitor_team: Some(lakers()),
            ..Default::default()
        };

        let first = from_box_score(&record).id;
        let second = from_box_score(&record.clone()).id;

        assert_eq!(first, second);
        assert_eq!(first, matchup_id(2, 14));
        assert_ne!(first, matchup_id(14, 2));
    }

    #[test]
    fn test_box_score_explicit_id_wins() {
        let record = RawBoxScore {
            id: Some(42),
            home_team: Some(celtics()),
            visitor_team: Some(lakers()),
            ..Default::default()
        };
        assert_eq!(from_box_score(&record).id, 42);

        let zero = RawBoxScore {
            id: Some(0),
            ..record
        };
        assert_eq!(from_box_score(&zero).id, matchup_id(2, 14));
    }
}
