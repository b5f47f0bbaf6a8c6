use chrono::{DateTime, Utc};
use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// The terminal failure modes of one search attempt.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The input was empty or whitespace-only.
    #[error("a username is required")]
    InvalidInput,

    /// No account exists for the requested login.
    #[error("no profile found for '{0}'")]
    UserNotFound(String),

    /// The request quota is exhausted, either locally or server-side.
    #[error("API rate limit exceeded{}", reset_hint(.resets_at))]
    RateLimited {
        /// The time at which the quota resets, when known.
        resets_at: Option<DateTime<Utc>>,
    },

    /// The profile request failed with a transport error or an unexpected status.
    #[error("profile request failed: {0}")]
    FetchFailed(String),
}

fn reset_hint(resets_at: &Option<DateTime<Utc>>) -> String {
    match resets_at {
        Some(resets_at) => format!(", try again after {}", resets_at.format("%H:%M:%S UTC")),
        None => String::new(),
    }
}
