use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarCounterError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx answer from the GitHub API, kept verbatim so it can be relayed.
    #[error("GitHub API error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("Malformed link: {0}")]
    MalformedLink(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, StarCounterError>;
