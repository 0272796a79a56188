//! GitHub API wire types
//!
//! Deserialization targets for the GraphQL contribution queries and the
//! commit listing REST endpoint, plus conversion into domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::analytics::ValidationError;
use crate::models::{CommitSummary, ContributionData, ContributionDay, ContributionItem, Repository};

use super::GitHubError;

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlErrorNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorNode {
    pub message: String,
}

// ===== Contribution calendar =====

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarData {
    pub user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarUser {
    pub contributions_collection: CalendarCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarCollection {
    pub contribution_calendar: Calendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Calendar {
    pub total_contributions: i64,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarDay {
    pub date: NaiveDate,
    pub contribution_count: i64,
    pub weekday: i64,
}

/// Flattens the week-chunked calendar into a flat, validated day list
///
/// Counts and weekday indexes arrive as raw integers; anything negative or
/// out of range is rejected here so the rest of the service only ever sees
/// well-formed `ContributionDay` values.
pub(crate) fn flatten_calendar(calendar: Calendar) -> Result<ContributionData, GitHubError> {
    let mut contributions = Vec::new();

    for week in calendar.weeks {
        for day in week.contribution_days {
            let count = u32::try_from(day.contribution_count).map_err(|_| {
                ValidationError::NegativeCount {
                    date: day.date,
                    count: day.contribution_count,
                }
            })?;

            let weekday = u8::try_from(day.weekday)
                .ok()
                .filter(|w| *w <= 6)
                .ok_or(ValidationError::WeekdayOutOfRange {
                    date: day.date,
                    weekday: day.weekday,
                })?;

            contributions.push(ContributionDay::with_weekday(day.date, count, weekday));
        }
    }

    Ok(ContributionData {
        total: calendar.total_contributions.max(0) as u64,
        contributions,
    })
}

// ===== Day details =====

#[derive(Debug, Deserialize)]
pub(crate) struct DayDetailsData {
    pub user: Option<DayDetailsUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayDetailsUser {
    pub contributions_collection: DayCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayCollection {
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<RepoCommitNode>,
    #[serde(default)]
    pub issue_contributions: ContributionConnection<IssueNode>,
    #[serde(default)]
    pub pull_request_contributions: ContributionConnection<PullRequestNode>,
    #[serde(default)]
    pub pull_request_review_contributions: ContributionConnection<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContributionConnection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for ContributionConnection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepoCommitNode {
    pub repository: RepoNode,
    pub contributions: ContributionConnection<CommitCountNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoNode {
    pub name: String,
    pub owner: OwnerNode,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerNode {
    pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommitCountNode {
    pub commit_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueNode {
    pub issue: ItemNode,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestNode {
    pub pull_request: ItemNode,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemNode {
    pub title: String,
    pub url: String,
    pub number: u64,
    pub repository: RepoNode,
}

impl From<RepoNode> for Repository {
    fn from(node: RepoNode) -> Self {
        Self {
            owner: node.owner.login,
            name: node.name,
            url: node.url,
        }
    }
}

impl From<IssueNode> for ContributionItem {
    fn from(node: IssueNode) -> Self {
        Self {
            title: node.issue.title,
            url: node.issue.url,
            number: node.issue.number,
            repository: node.issue.repository.into(),
            occurred_at: node.occurred_at,
        }
    }
}

impl From<PullRequestNode> for ContributionItem {
    fn from(node: PullRequestNode) -> Self {
        Self {
            title: node.pull_request.title,
            url: node.pull_request.url,
            number: node.pull_request.number,
            repository: node.pull_request.repository.into(),
            occurred_at: node.occurred_at,
        }
    }
}

// ===== Commit listing (REST) =====

#[derive(Debug, Deserialize)]
pub(crate) struct RestCommit {
    pub sha: String,
    pub commit: RestCommitDetail,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestCommitDetail {
    pub message: String,
    pub author: RestCommitAuthor,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestCommitAuthor {
    pub date: DateTime<Utc>,
}

/// Trims a raw commit down to what the day view renders
pub(crate) fn summarize_commit(commit: RestCommit) -> CommitSummary {
    CommitSummary {
        sha: commit.sha.chars().take(7).collect(),
        message: commit.commit.message,
        url: commit.html_url,
        timestamp: commit.commit.author.date,
    }
}
