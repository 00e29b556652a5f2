//! Status derivation and display formatting shared by every record shape.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::America::New_York;

use crate::models::GameStatus;

/// Derive the game status from upstream status text.
///
/// Case-insensitive substring match, first hit wins: "final", then any of
/// "qtr" / "half" / "ot". Everything else (including a bare tip-off
/// timestamp) is scheduled.
pub fn parse_status(raw: &str) -> GameStatus {
    let lower = raw.to_lowercase();

    if lower.contains("final") {
        GameStatus::Final
    } else if lower.contains("qtr") || lower.contains("half") || lower.contains("ot") {
        GameStatus::InProgress
    } else {
        GameStatus::Scheduled
    }
}

/// Display name for a period: "1st".."4th", then "OT", "OT2", "OT3", ...
pub fn period_name(period: i64) -> String {
    match period {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        4 => "4th".to_string(),
        5 => "OT".to_string(),
        p if p > 5 => format!("OT{}", p - 4),
        p => format!("{}th", p),
    }
}

/// "{period} {clock}", collapsing to the period name when the clock is empty
pub fn in_progress_text(period: i64, clock: &str) -> String {
    format!("{} {}", period_name(period), clock.trim())
        .trim()
        .to_string()
}

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (a trailing "Z" is read as "+00:00") and naive ISO 8601
/// date-times, which are taken as UTC. Anything else yields `None`.
pub fn parse_datetime(value: Option<&str>) -> Option<DateTime<Utc>> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }

    let normalized = match text.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => text.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Tip-off in US Eastern civil time, e.g. "7:30 PM ET"
pub fn eastern_clock_text(start: DateTime<Utc>) -> String {
    start
        .with_timezone(&New_York)
        .format("%-I:%M %p ET")
        .to_string()
}

/// Scheduled games show their tip-off time, or "TBD" when there is none
pub fn scheduled_text(start: Option<DateTime<Utc>>) -> String {
    match start {
        Some(dt) => eastern_clock_text(dt),
        None => "TBD".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_priority() {
        assert_eq!(parse_status("Final"), GameStatus::Final);
        assert_eq!(parse_status("Final/OT"), GameStatus::Final);
        assert_eq!(parse_status("3rd Qtr"), GameStatus::InProgress);
        assert_eq!(parse_status("Halftime"), GameStatus::InProgress);
        assert_eq!(parse_status("OT"), GameStatus::InProgress);
        assert_eq!(parse_status("2OT"), GameStatus::InProgress);
        assert_eq!(parse_status("2024-01-15T19:30:00Z"), GameStatus::Scheduled);
        assert_eq!(parse_status(""), GameStatus::Scheduled);
    }

    #[test]
    fn test_period_names() {
        assert_eq!(period_name(1), "1st");
        assert_eq!(period_name(2), "2nd");
        assert_eq!(period_name(3), "3rd");
        assert_eq!(period_name(4), "4th");
        assert_eq!(period_name(5), "OT");
        assert_eq!(period_name(6), "OT2");
        assert_eq!(period_name(8), "OT4");
        assert_eq!(period_name(0), "0th");
    }

    #[test]
    fn test_in_progress_text() {
        assert_eq!(in_progress_text(3, "4:32"), "3rd 4:32");
        assert_eq!(in_progress_text(2, ""), "2nd");
        assert_eq!(in_progress_text(6, " 0:45 "), "OT2 0:45");
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = "2024-01-15T19:30:00Z".parse::<DateTime<Utc>>().unwrap();

        assert_eq!(parse_datetime(Some("2024-01-15T19:30:00Z")), Some(expected));
        assert_eq!(parse_datetime(Some("2024-01-15T19:30:00.000Z")), Some(expected));
        assert_eq!(parse_datetime(Some("2024-01-15T14:30:00-05:00")), Some(expected));
        assert_eq!(parse_datetime(Some("2024-01-15T19:30:00")), Some(expected));
        assert_eq!(parse_datetime(Some("2024-01-15 19:30:00")), Some(expected));
        assert_eq!(
            parse_datetime(Some("2024-01-15 19:30:00.250")).map(|d| d.timestamp()),
            Some(expected.timestamp())
        );
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert_eq!(parse_datetime(None), None);
        assert_eq!(parse_datetime(Some("")), None);
        assert_eq!(parse_datetime(Some("Final")), None);
        assert_eq!(parse_datetime(Some("3rd Qtr")), None);
    }

    #[test]
    fn test_eastern_clock_text_tracks_dst() {
        let winter = parse_datetime(Some("2024-01-15T19:30:00Z")).unwrap();
        assert_eq!(eastern_clock_text(winter), "2:30 PM ET");

        let summer = parse_datetime(Some("2024-06-06T00:30:00Z")).unwrap();
        assert_eq!(eastern_clock_text(summer), "8:30 PM ET");

        let morning = parse_datetime(Some("2024-01-15T17:05:00Z")).unwrap();
        assert_eq!(eastern_clock_text(morning), "12:05 PM ET");
    }

    #[test]
    fn test_scheduled_text_without_time() {
        assert_eq!(scheduled_text(None), "TBD");
    }
}
