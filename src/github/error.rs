//! GitHub client error types

use thiserror::Error;

use crate::analytics::ValidationError;

/// Errors from the GitHub API client
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the API
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// GraphQL-level error returned alongside a 200
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The queried user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Operation needs an API token and none is configured
    #[error("GitHub token not configured")]
    TokenMissing,

    /// Configured token cannot be sent as a header value
    #[error("Invalid GitHub token")]
    InvalidToken,

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Calendar data from the API failed validation
    #[error("Invalid contribution data: {0}")]
    Validation(#[from] ValidationError),
}
