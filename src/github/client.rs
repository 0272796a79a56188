//! GitHub API client
//!
//! Fetches the contribution calendar and the per-day activity breakdown
//! over GraphQL, and lists commits per repository over REST. A token is
//! optional for the calendar and required for day details.

use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::models::{CommitSummary, ContributionData, DayDetails, Repository, RepositoryCommits};

use super::response::{
    flatten_calendar, summarize_commit, CalendarData, DayDetailsData, GraphQlEnvelope, RestCommit,
};
use super::GitHubError;

/// Default GitHub API origin
pub const GITHUB_API: &str = "https://api.github.com";

/// GraphQL query for the year-long contribution calendar
const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
            weekday
          }
        }
      }
    }
  }
}
"#;

/// GraphQL query for one day of commits, issues, PRs, and reviews
const DAY_DETAILS_QUERY: &str = r#"
query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      commitContributionsByRepository {
        repository {
          name
          owner { login }
          url
        }
        contributions(first: 100) {
          nodes {
            commitCount
          }
        }
      }
      issueContributions(first: 100) {
        nodes {
          issue {
            title
            url
            number
            repository { name owner { login } }
          }
          occurredAt
        }
      }
      pullRequestContributions(first: 100) {
        nodes {
          pullRequest {
            title
            url
            number
            repository { name owner { login } }
          }
          occurredAt
        }
      }
      pullRequestReviewContributions(first: 100) {
        nodes {
          pullRequest {
            title
            url
            number
            repository { name owner { login } }
          }
          occurredAt
        }
      }
    }
  }
}
"#;

/// GitHub API client
pub struct GitHubClient {
    /// HTTP client
    http: reqwest::Client,
    /// API origin, overridable for tests
    api_base: String,
    /// Personal access token, when configured
    token: Option<String>,
}

impl GitHubClient {
    /// Client against the public GitHub API
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(GITHUB_API, token)
    }

    /// Client against a non-default API origin (used by tests)
    pub fn with_base_url(api_base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Fetches the contribution calendar for a user
    ///
    /// Works without a token for public profiles, subject to lower rate
    /// limits. The week-chunked calendar is flattened and validated.
    ///
    /// # Arguments
    /// * `username` - GitHub login to query
    ///
    /// # Returns
    /// The flat day list plus GitHub's own total for the period
    pub async fn fetch_contributions(
        &self,
        username: &str,
    ) -> Result<ContributionData, GitHubError> {
        let data: CalendarData = self
            .post_graphql(CONTRIBUTIONS_QUERY, json!({ "username": username }))
            .await?;

        let user = data.user.ok_or(GitHubError::UserNotFound)?;
        flatten_calendar(user.contributions_collection.contribution_calendar)
    }

    /// Fetches the full activity breakdown for a single day
    ///
    /// Requires a configured token. Commit listings are fetched per
    /// repository concurrently; a repository that fails to list (deleted,
    /// private, rate limited) degrades to an empty commit list instead of
    /// failing the whole day.
    ///
    /// # Arguments
    /// * `username` - GitHub login to query
    /// * `date` - Day to inspect, bounded in UTC
    pub async fn fetch_day_details(
        &self,
        username: &str,
        date: NaiveDate,
    ) -> Result<DayDetails, GitHubError> {
        if self.token.is_none() {
            return Err(GitHubError::TokenMissing);
        }

        let from = day_start_utc(date);
        let until = day_end_utc(date);

        let data: DayDetailsData = self
            .post_graphql(
                DAY_DETAILS_QUERY,
                json!({ "username": username, "from": from, "to": until }),
            )
            .await?;

        let user = data.user.ok_or(GitHubError::UserNotFound)?;
        let collection = user.contributions_collection;

        let commit_futures: Vec<_> = collection
            .commit_contributions_by_repository
            .into_iter()
            .map(|node| {
                let commit_count: u32 = node.contributions.nodes.iter().map(|n| n.commit_count).sum();
                let repository = Repository::from(node.repository);
                let since = from.clone();
                let until = until.clone();
                async move {
                    let commits = self
                        .fetch_repo_commits(&repository, username, &since, &until)
                        .await;
                    RepositoryCommits {
                        repository,
                        commit_count,
                        commits,
                    }
                }
            })
            .collect();
        let commit_details = join_all(commit_futures).await;

        Ok(DayDetails {
            date,
            commit_details,
            issues: collection
                .issue_contributions
                .nodes
                .into_iter()
                .map(Into::into)
                .collect(),
            pull_requests: collection
                .pull_request_contributions
                .nodes
                .into_iter()
                .map(Into::into)
                .collect(),
            reviews: collection
                .pull_request_review_contributions
                .nodes
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }

    /// Sends a GraphQL query and unwraps the response envelope
    async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GitHubError> {
        let response = self
            .http
            .post(format!("{}/graphql", self.api_base))
            .headers(self.base_headers()?)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GraphQlEnvelope<T> = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            if let Some(first) = errors.first() {
                return Err(GitHubError::GraphQl(first.message.clone()));
            }
        }

        envelope
            .data
            .ok_or_else(|| GitHubError::InvalidResponse("Missing data in response".to_string()))
    }

    /// Lists commits authored by `username` in one repository for a window
    ///
    /// Failures degrade to an empty list so the day view still renders.
    async fn fetch_repo_commits(
        &self,
        repository: &Repository,
        username: &str,
        since: &str,
        until: &str,
    ) -> Vec<CommitSummary> {
        let url = format!(
            "{}/repos/{}/{}/commits",
            self.api_base, repository.owner, repository.name
        );

        let headers = match self.base_headers() {
            Ok(headers) => headers,
            Err(_) => return Vec::new(),
        };

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .query(&[
                ("author", username),
                ("since", since),
                ("until", until),
                ("per_page", "100"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                eprintln!(
                    "[aml-web] Commit listing for {} returned {}",
                    repository.full_name(),
                    response.status()
                );
                return Vec::new();
            }
            Err(e) => {
                eprintln!(
                    "[aml-web] Commit listing for {} failed: {}",
                    repository.full_name(),
                    e
                );
                return Vec::new();
            }
        };

        match response.json::<Vec<RestCommit>>().await {
            Ok(commits) => commits.into_iter().map(summarize_commit).collect(),
            Err(e) => {
                eprintln!(
                    "[aml-web] Commit listing for {} unreadable: {}",
                    repository.full_name(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Common headers for both API surfaces
    fn base_headers(&self) -> Result<HeaderMap, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("aml-web"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(token) = &self.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::try_from(format!("Bearer {}", token))
                    .map_err(|_| GitHubError::InvalidToken)?,
            );
        }

        Ok(headers)
    }
}

/// UTC start of day in the DateTime format the API expects
fn day_start_utc(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// UTC end of day (23:59:59)
fn day_end_utc(date: NaiveDate) -> String {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(end)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
