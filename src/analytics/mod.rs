//! Contribution analytics
//!
//! Pure calculation layer for the GitHub activity views: rolling averages,
//! streaks, weekday and month aggregates, and heatmap intensity levels.
//!
//! ## Architecture
//!
//! - **Statistics**: computed in one shot from a flattened calendar
//! - **Determinism**: no clocks or I/O in here; callers inject "today"
//! - **Order independence**: inputs are sorted by date before computing
//!
//! The handlers in `server` call into this module; everything here is also
//! usable as a plain library.

mod error;
mod types;


pub use error::ValidationError;
pub use types::*;

/// Calculator module for statistics computation
pub mod calculator;
