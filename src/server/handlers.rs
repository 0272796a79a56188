//! HTTP route handlers
//!
//! The GitHub endpoints proxy the upstream API so the access token never
//! reaches a browser; the contact endpoint relays form submissions to the
//! configured mailer.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{calculator, Statistics};
use crate::contact::{ContactForm, Mailer, ResendMailer};
use crate::github::{GitHubClient, GitHubError};
use crate::models::{ContributionData, DayDetails};

use super::config::AppConfig;
use super::error::ApiError;

// ===== Shared State =====

/// State shared across request handlers
pub struct AppState {
    /// GitHub API client
    pub github: GitHubClient,
    /// Contact relay; `None` until both Resend credentials are configured
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    /// Builds handler state from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let mailer: Option<Arc<dyn Mailer>> =
            match (&config.resend_api_key, &config.contact_email) {
                (Some(key), Some(to)) => Some(Arc::new(ResendMailer::new(key.clone(), to.clone()))),
                _ => None,
            };

        Self {
            github: GitHubClient::new(config.github_token.clone()),
            mailer,
        }
    }
}

// ===== Request/Response Types =====

/// Query parameters for the username-keyed GitHub endpoints
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// Query parameters for the day details endpoint
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub username: Option<String>,
    pub date: Option<String>,
}

/// Response body for the stats endpoint
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub username: String,
    pub statistics: Statistics,
}

// ===== Handlers =====

/// GET /api/health - Service health check
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
            "service": "aml-web",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// GET /api/github-contributions - Contribution calendar for a user
pub async fn github_contributions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<ContributionData>, ApiError> {
    let username = require_username(query.username.as_deref())?;
    let data = state.github.fetch_contributions(username).await?;
    Ok(Json(data))
}

/// GET /api/github-stats - Derived statistics for a user's calendar
///
/// Streaks are measured against the server's local date, matching what a
/// visitor sees on the calendar itself.
pub async fn github_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let username = require_username(query.username.as_deref())?;
    let data = state.github.fetch_contributions(username).await?;
    calculator::validate_contributions(&data.contributions).map_err(GitHubError::from)?;

    let today = Local::now().date_naive();
    let statistics = calculator::calculate_statistics(&data.contributions, today);

    Ok(Json(StatsResponse {
        username: username.to_string(),
        statistics,
    }))
}

/// GET /api/github-day-details - Commits, issues, PRs and reviews for one day
pub async fn github_day_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayDetails>, ApiError> {
    let username = non_empty(query.username.as_deref());
    let date_param = non_empty(query.date.as_deref());

    let (username, date_param) = match (username, date_param) {
        (Some(username), Some(date_param)) => (username, date_param),
        _ => return Err(ApiError::MissingDayParams),
    };

    let date = NaiveDate::parse_from_str(date_param, "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidParameter("Invalid date: expected YYYY-MM-DD".to_string()))?;

    let details = state.github.fetch_day_details(username, date).await?;
    Ok(Json(details))
}

/// POST /api/contact - Relays a contact form submission
pub async fn contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    form.validate()?;

    let mailer = state.mailer.as_ref().ok_or_else(|| {
        eprintln!("[aml-web] Contact form submitted but the mailer is not configured");
        ApiError::EmailNotConfigured
    })?;

    if let Err(e) = mailer.send(&form).await {
        eprintln!("[aml-web] Contact form error: {}", e);
        return Err(ApiError::from(e));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

// ===== Helpers =====

fn require_username(username: Option<&str>) -> Result<&str, ApiError> {
    non_empty(username).ok_or(ApiError::MissingUsername)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
