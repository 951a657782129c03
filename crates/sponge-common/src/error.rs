use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpongeError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("API response is empty for {endpoint}. Reason: {detail}")]
    ObjectNotFound { endpoint: String, detail: String },

    #[error("API request to {endpoint} failed with HTTP {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Malformed response at `{path}`: {reason}")]
    MalformedResponse { path: String, reason: String },

    #[error("Image decode error: {0}")]
    Image(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpongeError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SpongeError::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for SpongeError {
    fn from(e: reqwest::Error) -> Self {
        SpongeError::Transport(e.to_string())
    }
}

impl From<csv::Error> for SpongeError {
    fn from(e: csv::Error) -> Self {
        SpongeError::Io(std::io::Error::other(e.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, SpongeError>;
