//! Error types for slackline-api

use thiserror::Error;

/// Web API error type
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Slack answered with `ok: false`
    #[error("slack api error: {0}")]
    Api(String),

    /// Response did not match the expected shape
    #[error("response parsing error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Slack error code for [`Error::Api`] (e.g. `invalid_auth`)
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(code) => Some(code),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
