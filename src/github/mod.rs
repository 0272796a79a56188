//! GitHub API integration
//!
//! GraphQL client for the contribution calendar and the per-day activity
//! drill-down, plus the commit listing REST endpoint. Raw responses are
//! converted into the domain models in `models` at this boundary.

mod client;
mod error;
mod response;

pub use client::{GitHubClient, GITHUB_API};
pub use error::GitHubError;

#[cfg(test)]
mod tests;
