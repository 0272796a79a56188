//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::contact::{FormError, MailerError};
use crate::github::GitHubError;

/// Errors surfaced by the API handlers
///
/// Every variant renders as a `{"error": message}` JSON body with a
/// matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Username is required")]
    MissingUsername,

    #[error("Username and date are required")]
    MissingDayParams,

    #[error("{0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Email service not configured. Please contact support directly.")]
    EmailNotConfigured,

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("Failed to send message. Please try again later.")]
    Mailer(#[from] MailerError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUsername
            | Self::MissingDayParams
            | Self::InvalidParameter(_)
            | Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::EmailNotConfigured | Self::Mailer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GitHub(err) => github_status(err),
        }
    }
}

/// Maps upstream GitHub failures onto response statuses
///
/// API errors keep the upstream status so rate limiting stays visible to
/// the caller; transport and decode failures read as a bad gateway.
fn github_status(err: &GitHubError) -> StatusCode {
    match err {
        GitHubError::UserNotFound => StatusCode::NOT_FOUND,
        GitHubError::GraphQl(_) => StatusCode::BAD_REQUEST,
        GitHubError::Api { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        GitHubError::TokenMissing | GitHubError::InvalidToken => StatusCode::INTERNAL_SERVER_ERROR,
        GitHubError::Network(_) | GitHubError::InvalidResponse(_) | GitHubError::Validation(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
