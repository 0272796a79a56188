//! Analytics module error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised when contribution data fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Same calendar date appears more than once
    #[error("Duplicate date in contribution data: {0}")]
    DuplicateDate(NaiveDate),

    /// Contribution count below zero (only possible on unconverted wire data)
    #[error("Negative contribution count {count} on {date}")]
    NegativeCount { date: NaiveDate, count: i64 },

    /// Weekday index outside 0-6
    #[error("Weekday {weekday} out of range on {date}")]
    WeekdayOutOfRange { date: NaiveDate, weekday: i64 },

    /// Weekday index disagrees with the calendar date
    #[error("Weekday {weekday} does not match {date} (expected {expected})")]
    WeekdayMismatch {
        date: NaiveDate,
        weekday: u8,
        expected: u8,
    },
}
