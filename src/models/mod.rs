//! Domain data models
//!
//! This module defines the core data structures shared across the service:
//! contribution calendar records and the per-day activity breakdown.

pub mod contribution;
pub mod day_details;

pub use contribution::*;
pub use day_details::*;
