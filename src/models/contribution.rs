//! Contribution data models
//!
//! Defines the per-day contribution record and the calendar payload
//! returned by the GitHub contributions endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day of GitHub contribution activity.
///
/// `date` is a calendar date (no time zone); it serializes as `YYYY-MM-DD`.
/// `weekday` is GitHub's day-of-week index (0 = Sunday .. 6 = Saturday) and
/// is only present on records that came from the contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            weekday: None,
        }
    }

    pub fn with_weekday(date: NaiveDate, count: u32, weekday: u8) -> Self {
        Self {
            date,
            count,
            weekday: Some(weekday),
        }
    }
}

/// A full contribution calendar: the flattened day list plus the total
/// reported by GitHub for the period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContributionData {
    pub total: u64,
    pub contributions: Vec<ContributionDay>,
}

// ===== Contribution Model Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_contribution_day_serializes_date_as_iso() {
        let day = ContributionDay::new(date("2024-01-15"), 3);
        let json = serde_json::to_value(&day).unwrap();

        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_contribution_day_omits_missing_weekday() {
        let day = ContributionDay::new(date("2024-01-15"), 3);
        let json = serde_json::to_value(&day).unwrap();

        assert!(json.get("weekday").is_none());

        let day = ContributionDay::with_weekday(date("2024-01-14"), 1, 0);
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["weekday"], 0);
    }

    #[test]
    fn test_contribution_day_rejects_malformed_date() {
        let result: Result<ContributionDay, _> =
            serde_json::from_str(r#"{"date": "not-a-date", "count": 1}"#);
        assert!(result.is_err());

        let result: Result<ContributionDay, _> =
            serde_json::from_str(r#"{"date": "2024-13-40", "count": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_contribution_day_rejects_negative_count() {
        let result: Result<ContributionDay, _> =
            serde_json::from_str(r#"{"date": "2024-01-15", "count": -2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_contribution_data_round_trip() {
        let data = ContributionData {
            total: 4,
            contributions: vec![
                ContributionDay::with_weekday(date("2024-01-14"), 1, 0),
                ContributionDay::with_weekday(date("2024-01-15"), 3, 1),
            ],
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: ContributionData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }
}
