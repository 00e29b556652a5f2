//! Raw record shapes returned by balldontlie.io.
//!
//! Every field is optional: upstream omits or nulls fields depending on game
//! state, and canonicalization supplies a default for each one.

use serde::Deserialize;

/// `{ "data": [...] }` envelope wrapping every list endpoint
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

/// Team object nested in game and box score records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeam {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub abbreviation: Option<String>,
    pub full_name: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
}

/// Record from `/games`: schedule plus final or in-progress score
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGame {
    pub id: Option<i64>,
    pub date: Option<String>,
    pub datetime: Option<String>,
    /// "Final", "3rd Qtr", "Halftime", or the scheduled tip-off as an ISO timestamp
    pub status: Option<String>,
    pub period: Option<i64>,
    pub time: Option<String>,
    pub postseason: Option<bool>,
    pub season: Option<i64>,
    pub home_team: Option<RawTeam>,
    pub visitor_team: Option<RawTeam>,
    pub home_team_score: Option<i64>,
    pub visitor_team_score: Option<i64>,
}

/// Record from `/box_scores` and `/box_scores/live`: live score and clock.
///
/// Box score team objects also carry player lines, which are not read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBoxScore {
    pub id: Option<i64>,
    pub date: Option<String>,
    pub datetime: Option<String>,
    pub status: Option<String>,
    pub period: Option<i64>,
    pub time: Option<String>,
    pub postseason: Option<bool>,
    pub season: Option<i64>,
    pub home_team: Option<RawTeam>,
    pub visitor_team: Option<RawTeam>,
    pub home_team_score: Option<i64>,
    pub visitor_team_score: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_box_score_decodes() {
        let json = r#"{
            "data": [
                {
                    "status": "2nd Qtr",
                    "period": null,
                    "home_team": { "id": 2, "name": "Celtics", "players": [{ "min": "12" }] }
                }
            ]
        }"#;

        let response: DataResponse<RawBoxScore> = serde_json::from_str(json).unwrap();
        let record = &response.data[0];

        assert_eq!(record.status.as_deref(), Some("2nd Qtr"));
        assert!(record.period.is_none());
        assert!(record.visitor_team.is_none());
        assert_eq!(record.home_team.as_ref().and_then(|t| t.id), Some(2));
    }

    #[test]
    fn test_missing_data_field_is_an_error() {
        let result = serde_json::from_str::<DataResponse<RawGame>>(r#"{ "meta": {} }"#);
        assert!(result.is_err());
    }
}
