use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("GitHub API error: {message}")]
    GitHubApi { status: Option<u16>, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Failed to fetch stats for {username}: {source}")]
    FetchFailed {
        username: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Caller-fault and quota errors are terminal; everything else is treated
    /// as transient by the retry policy.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Error::NotFound(_)
                | Error::Forbidden(_)
                | Error::RateLimited { .. }
                | Error::Config(_)
                | Error::InvalidHeader(_)
                | Error::FetchFailed { .. }
        )
    }

    /// HTTP-style status code describing this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Forbidden(_) => 403,
            Error::RateLimited { .. } => 429,
            Error::GitHubApi { status, .. } => status.unwrap_or(502),
            Error::Network(e) => e.status().map(|s| s.as_u16()).unwrap_or(502),
            Error::GraphQl(_) => 502,
            Error::FetchFailed { source, .. } => source.status_code(),
            Error::Config(_) => 400,
            _ => 500,
        }
    }

    /// Innermost error, looking through `FetchFailed` wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::FetchFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn fetch_failed(username: &str, source: Error) -> Self {
        Error::FetchFailed {
            username: username.to_string(),
            source: Box::new(source),
        }
    }
}
