//! GitHub client tests
//!
//! Exercises the client against a mocked API server: calendar flattening,
//! error mapping, and the day-details fan-out across GraphQL and REST.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::response::{flatten_calendar, Calendar, CalendarDay, CalendarWeek};
use super::*;
use crate::analytics::ValidationError;

// ===== Helper Functions =====

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn calendar_body() -> serde_json::Value {
    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": 8,
                        "weeks": [
                            {
                                "contributionDays": [
                                    { "date": "2024-03-03", "contributionCount": 2, "weekday": 0 },
                                    { "date": "2024-03-04", "contributionCount": 0, "weekday": 1 }
                                ]
                            },
                            {
                                "contributionDays": [
                                    { "date": "2024-03-10", "contributionCount": 6, "weekday": 0 }
                                ]
                            }
                        ]
                    }
                }
            }
        }
    })
}

fn day_details_body() -> serde_json::Value {
    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "commitContributionsByRepository": [
                        {
                            "repository": {
                                "name": "hello-world",
                                "owner": { "login": "octocat" },
                                "url": "https://github.com/octocat/hello-world"
                            },
                            "contributions": {
                                "nodes": [ { "commitCount": 2 } ]
                            }
                        }
                    ],
                    "issueContributions": {
                        "nodes": [
                            {
                                "issue": {
                                    "title": "Heatmap renders off by one day",
                                    "url": "https://github.com/octocat/hello-world/issues/7",
                                    "number": 7,
                                    "repository": { "name": "hello-world", "owner": { "login": "octocat" } }
                                },
                                "occurredAt": "2024-03-01T12:00:00Z"
                            }
                        ]
                    },
                    "pullRequestContributions": {
                        "nodes": [
                            {
                                "pullRequest": {
                                    "title": "Add rolling averages",
                                    "url": "https://github.com/octocat/hello-world/pull/8",
                                    "number": 8,
                                    "repository": { "name": "hello-world", "owner": { "login": "octocat" } }
                                },
                                "occurredAt": "2024-03-01T13:00:00Z"
                            }
                        ]
                    },
                    "pullRequestReviewContributions": {
                        "nodes": [
                            {
                                "pullRequest": {
                                    "title": "Fix streak reset",
                                    "url": "https://github.com/octocat/hello-world/pull/9",
                                    "number": 9,
                                    "repository": { "name": "hello-world", "owner": { "login": "octocat" } }
                                },
                                "occurredAt": "2024-03-01T14:00:00Z"
                            }
                        ]
                    }
                }
            }
        }
    })
}

fn commit_listing_body() -> serde_json::Value {
    json!([
        {
            "sha": "abcdef1234567890",
            "commit": {
                "message": "Fix parser edge case",
                "author": { "date": "2024-03-01T10:00:00Z" }
            },
            "html_url": "https://github.com/octocat/hello-world/commit/abcdef1234567890"
        }
    ])
}

// ===== flatten_calendar Tests =====

#[test]
fn test_flatten_rejects_out_of_range_weekday() {
    let calendar = Calendar {
        total_contributions: 1,
        weeks: vec![CalendarWeek {
            contribution_days: vec![CalendarDay {
                date: date("2024-03-03"),
                contribution_count: 1,
                weekday: 9,
            }],
        }],
    };

    let err = flatten_calendar(calendar).unwrap_err();
    assert!(matches!(
        err,
        GitHubError::Validation(ValidationError::WeekdayOutOfRange { weekday: 9, .. })
    ));
}

#[test]
fn test_flatten_clamps_negative_total() {
    let calendar = Calendar {
        total_contributions: -3,
        weeks: vec![],
    };

    let data = flatten_calendar(calendar).unwrap();
    assert_eq!(data.total, 0);
}

// ===== fetch_contributions Tests =====

#[tokio::test]
async fn test_fetch_contributions_flattens_weeks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(calendar_body()))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), None);
    let data = client.fetch_contributions("octocat").await.unwrap();

    assert_eq!(data.total, 8);
    assert_eq!(data.contributions.len(), 3);
    assert_eq!(data.contributions[0].date, date("2024-03-03"));
    assert_eq!(data.contributions[0].count, 2);
    assert_eq!(data.contributions[0].weekday, Some(0));
    assert_eq!(data.contributions[1].count, 0);
    assert_eq!(data.contributions[2].date, date("2024-03-10"));
}

#[tokio::test]
async fn test_fetch_contributions_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "user": null } })))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), None);
    let err = client.fetch_contributions("ghost").await.unwrap_err();

    assert!(matches!(err, GitHubError::UserNotFound));
}

#[tokio::test]
async fn test_fetch_contributions_surfaces_graphql_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [ { "message": "Something went wrong" } ]
        })))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), None);
    let err = client.fetch_contributions("octocat").await.unwrap_err();

    match err {
        GitHubError::GraphQl(message) => assert_eq!(message, "Something went wrong"),
        other => panic!("expected GraphQl error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_contributions_maps_http_error_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), None);
    let err = client.fetch_contributions("octocat").await.unwrap_err();

    match err {
        GitHubError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API rate limit exceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_contributions_maps_http_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), None);
    let err = client.fetch_contributions("octocat").await.unwrap_err();

    match err {
        GitHubError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP error! status: 500");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_contributions_rejects_negative_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "user": {
                    "contributionsCollection": {
                        "contributionCalendar": {
                            "totalContributions": 5,
                            "weeks": [
                                {
                                    "contributionDays": [
                                        { "date": "2024-03-03", "contributionCount": -1, "weekday": 0 }
                                    ]
                                }
                            ]
                        }
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), None);
    let err = client.fetch_contributions("octocat").await.unwrap_err();

    assert!(matches!(
        err,
        GitHubError::Validation(ValidationError::NegativeCount { count: -1, .. })
    ));
}

// ===== fetch_day_details Tests =====

#[tokio::test]
async fn test_fetch_day_details_requires_token() {
    let client = GitHubClient::with_base_url("http://127.0.0.1:1", None);
    let err = client
        .fetch_day_details("octocat", date("2024-03-01"))
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::TokenMissing));
}

#[tokio::test]
async fn test_fetch_day_details_merges_graphql_and_rest() {
    let server = MockServer::start().await;

    // Day window is expressed as UTC bounds in the GraphQL variables
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("2024-03-01T00:00:00Z"))
        .and(body_string_contains("2024-03-01T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(day_details_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_listing_body()))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), Some("test-token".to_string()));
    let details = client
        .fetch_day_details("octocat", date("2024-03-01"))
        .await
        .unwrap();

    assert_eq!(details.date, date("2024-03-01"));

    assert_eq!(details.commit_details.len(), 1);
    let repo_commits = &details.commit_details[0];
    assert_eq!(repo_commits.repository.full_name(), "octocat/hello-world");
    assert_eq!(repo_commits.commit_count, 2);
    assert_eq!(repo_commits.commits.len(), 1);
    assert_eq!(repo_commits.commits[0].sha, "abcdef1");
    assert_eq!(repo_commits.commits[0].message, "Fix parser edge case");

    assert_eq!(details.issues.len(), 1);
    assert_eq!(details.issues[0].number, 7);
    assert_eq!(details.issues[0].repository.full_name(), "octocat/hello-world");

    assert_eq!(details.pull_requests.len(), 1);
    assert_eq!(details.pull_requests[0].number, 8);

    assert_eq!(details.reviews.len(), 1);
    assert_eq!(details.reviews[0].number, 9);
}

#[tokio::test]
async fn test_fetch_day_details_tolerates_failing_commit_listing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "user": {
                    "contributionsCollection": {
                        "commitContributionsByRepository": [
                            {
                                "repository": { "name": "alpha", "owner": { "login": "octocat" } },
                                "contributions": { "nodes": [ { "commitCount": 1 } ] }
                            },
                            {
                                "repository": { "name": "beta", "owner": { "login": "octocat" } },
                                "contributions": { "nodes": [ { "commitCount": 3 } ] }
                            }
                        ],
                        "issueContributions": { "nodes": [] },
                        "pullRequestContributions": { "nodes": [] },
                        "pullRequestReviewContributions": { "nodes": [] }
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/alpha/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_listing_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/beta/commits"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), Some("test-token".to_string()));
    let details = client
        .fetch_day_details("octocat", date("2024-03-01"))
        .await
        .unwrap();

    assert_eq!(details.commit_details.len(), 2);
    assert_eq!(details.commit_details[0].commits.len(), 1);
    assert_eq!(details.commit_details[1].commits.len(), 0);
    // Count from the contributions collection survives a failed listing
    assert_eq!(details.commit_details[1].commit_count, 3);
}

#[tokio::test]
async fn test_fetch_day_details_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "user": null } })))
        .mount(&server)
        .await;

    let client = GitHubClient::with_base_url(server.uri(), Some("test-token".to_string()));
    let err = client
        .fetch_day_details("ghost", date("2024-03-01"))
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::UserNotFound));
}
