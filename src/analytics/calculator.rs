//! Analytics calculation logic
//!
//! Functions for computing contribution statistics: rolling averages,
//! streaks, weekday and month aggregates, and heatmap intensity levels.
//! All functions are pure; "today" is passed in by callers that need it.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::models::ContributionDay;

use super::{DayOfWeekStats, MaxDay, MonthStats, RollingAveragePoint, Statistics, ValidationError};

/// Weekday names indexed by day-of-week (0 = Sunday .. 6 = Saturday)
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Rounds to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Day-of-week index for a date (0 = Sunday .. 6 = Saturday)
fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Validates a batch of contribution records
///
/// Checks the invariants the calculators rely on:
/// - no date appears twice
/// - any `weekday` field is in range and agrees with its date
///
/// Negative counts cannot be represented here; they are rejected earlier,
/// when raw API data is converted into `ContributionDay` values.
///
/// # Arguments
/// * `contributions` - Records to check, in any order
///
/// # Returns
/// `Ok(())` when all records are consistent, otherwise the first violation
pub fn validate_contributions(contributions: &[ContributionDay]) -> Result<(), ValidationError> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();

    for day in contributions {
        if !seen.insert(day.date) {
            return Err(ValidationError::DuplicateDate(day.date));
        }

        if let Some(weekday) = day.weekday {
            if weekday > 6 {
                return Err(ValidationError::WeekdayOutOfRange {
                    date: day.date,
                    weekday: i64::from(weekday),
                });
            }

            let expected = weekday_index(day.date);
            if weekday != expected {
                return Err(ValidationError::WeekdayMismatch {
                    date: day.date,
                    weekday,
                    expected,
                });
            }
        }
    }

    Ok(())
}

/// Calculates a trailing rolling average over chronologically ordered data
///
/// Produces one point per input day. The window covers the current day and
/// up to `window_size - 1` preceding records, so early points average over
/// a shorter prefix instead of being dropped. Values are left unrounded for
/// chart rendering.
///
/// `window_size` must be at least 1. Input is expected in ascending date
/// order; `calculate_statistics` sorts before calling in here.
///
/// # Arguments
/// * `data` - Contribution records in ascending date order
/// * `window_size` - Number of trailing records per window
///
/// # Returns
/// A series the same length as `data`
pub fn calculate_rolling_average(
    data: &[ContributionDay],
    window_size: usize,
) -> Vec<RollingAveragePoint> {
    debug_assert!(window_size > 0, "window_size must be at least 1");

    let mut result = Vec::with_capacity(data.len());
    let mut window_sum: u64 = 0;

    for (i, day) in data.iter().enumerate() {
        window_sum += u64::from(day.count);
        if i >= window_size {
            window_sum -= u64::from(data[i - window_size].count);
        }

        let window_len = (i + 1).min(window_size);
        result.push(RollingAveragePoint {
            date: day.date,
            value: window_sum as f64 / window_len as f64,
            count: day.count,
        });
    }

    result
}

/// Calculates the streak of consecutive active days ending at `today`
///
/// Walks backwards from the most recent record. The streak is alive when
/// the most recent record is from today or yesterday; anything older means
/// the streak is broken and the result is 0. Each step back requires the
/// exact preceding calendar date with a positive count.
///
/// # Arguments
/// * `contributions` - Records in any order
/// * `today` - The date the streak is measured against
///
/// # Returns
/// Length of the active streak, 0 when broken or empty
pub fn calculate_current_streak(contributions: &[ContributionDay], today: NaiveDate) -> u32 {
    if contributions.is_empty() {
        return 0;
    }

    let mut sorted: Vec<&ContributionDay> = contributions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let most_recent = sorted[0].date;
    if (today - most_recent).num_days() > 1 {
        return 0;
    }

    let mut streak = 0;
    let mut expected = most_recent;

    for day in sorted {
        if day.date != expected || day.count == 0 {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }

    streak
}

/// Calculates the longest run of consecutive active days
///
/// A run extends only across adjacent calendar dates with positive counts.
/// A zero-count record breaks the run even when dates are adjacent; a date
/// gap between positive records starts a new run.
///
/// # Arguments
/// * `contributions` - Records in any order
///
/// # Returns
/// Length of the longest run, 0 when no day was active
pub fn calculate_longest_streak(contributions: &[ContributionDay]) -> u32 {
    if contributions.is_empty() {
        return 0;
    }

    let mut sorted: Vec<&ContributionDay> = contributions.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut longest: u32 = 0;
    let mut current: u32 = 0;
    let mut prev_date: Option<NaiveDate> = None;

    for day in sorted {
        if day.count > 0 {
            current = match prev_date {
                Some(prev) if (day.date - prev).num_days() == 1 => current + 1,
                _ => {
                    longest = longest.max(current);
                    1
                }
            };
            prev_date = Some(day.date);
        } else {
            longest = longest.max(current);
            current = 0;
            prev_date = None;
        }
    }

    longest.max(current)
}

/// Mean contributions per recorded day, rounded to two decimals
pub fn calculate_average_daily(contributions: &[ContributionDay]) -> f64 {
    if contributions.is_empty() {
        return 0.0;
    }

    let total: u64 = contributions.iter().map(|d| u64::from(d.count)).sum();
    round2(total as f64 / contributions.len() as f64)
}

/// Aggregates contributions by weekday name
///
/// Every weekday bucket is present in the result even when the input is
/// empty, so charts always render seven rows. The weekday is derived from
/// the date, not from the optional `weekday` field.
pub fn calculate_by_day_of_week(
    contributions: &[ContributionDay],
) -> HashMap<String, DayOfWeekStats> {
    let mut by_day: HashMap<String, DayOfWeekStats> = DAY_NAMES
        .iter()
        .map(|name| (name.to_string(), DayOfWeekStats::default()))
        .collect();

    for day in contributions {
        let name = DAY_NAMES[weekday_index(day.date) as usize];
        let bucket = by_day.entry(name.to_string()).or_default();
        bucket.total += u64::from(day.count);
        bucket.count += 1;
    }

    for bucket in by_day.values_mut() {
        bucket.average = if bucket.count > 0 {
            round2(bucket.total as f64 / bucket.count as f64)
        } else {
            0.0
        };
    }

    by_day
}

/// Aggregates contributions by calendar month ("YYYY-MM" keys)
///
/// Only months present in the input appear in the result. `days` counts
/// the records with a positive count, `count` counts all records.
pub fn calculate_by_month(contributions: &[ContributionDay]) -> HashMap<String, MonthStats> {
    let mut by_month: HashMap<String, MonthStats> = HashMap::new();

    for day in contributions {
        let key = day.date.format("%Y-%m").to_string();
        let bucket = by_month.entry(key).or_default();
        bucket.total += u64::from(day.count);
        bucket.count += 1;
        if day.count > 0 {
            bucket.days += 1;
        }
    }

    by_month
}

/// Computes the full statistics bundle for a contribution period
///
/// Sorts a copy of the input by date first, so callers may pass records in
/// any order and still get identical results. `today` anchors the current
/// streak; handlers pass the server's local date, tests pass a fixed one.
///
/// # Arguments
/// * `contributions` - Records in any order
/// * `today` - Date the current streak is measured against
///
/// # Returns
/// The complete `Statistics` bundle
pub fn calculate_statistics(contributions: &[ContributionDay], today: NaiveDate) -> Statistics {
    let mut ordered: Vec<ContributionDay> = contributions.to_vec();
    ordered.sort_by_key(|d| d.date);

    let total: u64 = ordered.iter().map(|d| u64::from(d.count)).sum();

    let rolling_7_data = calculate_rolling_average(&ordered, 7);
    let rolling_30_data = calculate_rolling_average(&ordered, 30);
    let rolling_7 = rolling_7_data.last().map(|p| round2(p.value)).unwrap_or(0.0);
    let rolling_30 = rolling_30_data
        .last()
        .map(|p| round2(p.value))
        .unwrap_or(0.0);

    // Strict comparison keeps the earliest date on ties. All-zero data
    // leaves the sentinel untouched (count 0, no date).
    let max_day = ordered.iter().fold(MaxDay::default(), |best, day| {
        if day.count > best.count {
            MaxDay {
                count: day.count,
                date: Some(day.date),
            }
        } else {
            best
        }
    });

    let active_days = ordered.iter().filter(|d| d.count > 0).count() as u32;

    Statistics {
        total,
        avg_daily: calculate_average_daily(&ordered),
        current_streak: calculate_current_streak(&ordered, today),
        longest_streak: calculate_longest_streak(&ordered),
        rolling_7,
        rolling_30,
        rolling_7_data,
        rolling_30_data,
        max_day,
        by_day_of_week: calculate_by_day_of_week(&ordered),
        by_month: calculate_by_month(&ordered),
        active_days,
        total_days: ordered.len() as u32,
    }
}

/// Heatmap intensity level for a day (0-4)
///
/// Level 0 is reserved for zero activity; any positive count lands in 1-4
/// based on its share of the period maximum: >= 75% is 4, >= 50% is 3,
/// >= 25% is 2, anything else 1.
pub fn contribution_level(count: u32, max: u32) -> u8 {
    if count == 0 || max == 0 {
        return 0;
    }

    let ratio = f64::from(count) / f64::from(max);
    if ratio >= 0.75 {
        4
    } else if ratio >= 0.5 {
        3
    } else if ratio >= 0.25 {
        2
    } else {
        1
    }
}
