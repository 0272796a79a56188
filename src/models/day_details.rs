//! Day detail models
//!
//! Structures for the per-day activity drill-down: which repositories were
//! committed to, plus the issues, pull requests, and reviews opened that day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A repository reference as reported by the GitHub API.
///
/// `url` is only available on commit contributions; issue and pull request
/// nodes carry just the owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Repository {
    pub owner: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Repository {
    /// "owner/name" form used in logs and summaries.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A single commit, trimmed to what the day view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommitSummary {
    /// Abbreviated commit id (first 7 characters).
    pub sha: String,
    pub message: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// All commits made to one repository on the requested day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RepositoryCommits {
    pub repository: Repository,
    /// Commit count reported by the contributions collection. May exceed
    /// `commits.len()` when the commit listing was truncated or unavailable.
    pub commit_count: u32,
    pub commits: Vec<CommitSummary>,
}

/// An issue, pull request, or review contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContributionItem {
    pub title: String,
    pub url: String,
    pub number: u64,
    pub repository: Repository,
    pub occurred_at: DateTime<Utc>,
}

/// Everything that happened on a single day, grouped by activity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DayDetails {
    pub date: NaiveDate,
    pub commit_details: Vec<RepositoryCommits>,
    pub issues: Vec<ContributionItem>,
    pub pull_requests: Vec<ContributionItem>,
    pub reviews: Vec<ContributionItem>,
}

// ===== Day Detail Model Tests =====
