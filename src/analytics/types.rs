//! Analytics type definitions
//!
//! Contains data structures for the contribution statistics computed from
//! a GitHub contribution calendar.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of a rolling-average series
///
/// Produced per input day; `value` is the unrounded mean over the trailing
/// window ending at `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RollingAveragePoint {
    /// Calendar date this point belongs to
    pub date: NaiveDate,

    /// Mean contribution count over the trailing window
    pub value: f64,

    /// Raw contribution count on this date
    pub count: u32,
}

/// The most active day of the period
///
/// `date` stays `None` when no day had a positive count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaxDay {
    pub count: u32,
    pub date: Option<NaiveDate>,
}

impl Default for MaxDay {
    fn default() -> Self {
        Self {
            count: 0,
            date: None,
        }
    }
}

/// Per-weekday aggregate (one bucket per day name, Sunday through Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DayOfWeekStats {
    /// Sum of contribution counts landing on this weekday
    pub total: u64,

    /// Number of records landing on this weekday
    pub count: u32,

    /// total / count, rounded to two decimals (0.0 for an empty bucket)
    pub average: f64,
}

/// Per-month aggregate, keyed by "YYYY-MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthStats {
    /// Sum of contribution counts in this month
    pub total: u64,

    /// Number of records in this month
    pub count: u32,

    /// Number of records with a positive count
    pub days: u32,
}

/// Full statistics bundle for a contribution period
///
/// Computed in one pass by `calculator::calculate_statistics`; serialized
/// as-is by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Statistics {
    /// Sum of all contribution counts
    pub total: u64,

    /// Mean contributions per recorded day, rounded to two decimals
    pub avg_daily: f64,

    /// Consecutive active days ending today or yesterday
    pub current_streak: u32,

    /// Longest run of consecutive active days in the period
    pub longest_streak: u32,

    /// Final 7-day rolling average, rounded to two decimals
    pub rolling_7: f64,

    /// Final 30-day rolling average, rounded to two decimals
    pub rolling_30: f64,

    /// Full 7-day rolling-average series (one point per input day)
    pub rolling_7_data: Vec<RollingAveragePoint>,

    /// Full 30-day rolling-average series (one point per input day)
    pub rolling_30_data: Vec<RollingAveragePoint>,

    /// Most active day; ties keep the earliest date
    pub max_day: MaxDay,

    /// Aggregates keyed by weekday name ("Sunday" .. "Saturday")
    pub by_day_of_week: HashMap<String, DayOfWeekStats>,

    /// Aggregates keyed by "YYYY-MM"
    pub by_month: HashMap<String, MonthStats>,

    /// Number of days with at least one contribution
    pub active_days: u32,

    /// Number of days in the input
    pub total_days: u32,
}
