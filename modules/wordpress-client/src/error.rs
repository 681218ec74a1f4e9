use thiserror::Error;

pub type Result<T> = std::result::Result<T, WordPressError>;

#[derive(Debug, Error)]
pub enum WordPressError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Requested page is beyond the last available page")]
    PageOutOfRange,
}

impl From<reqwest::Error> for WordPressError {
    fn from(err: reqwest::Error) -> Self {
        WordPressError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WordPressError {
    fn from(err: serde_json::Error) -> Self {
        WordPressError::Parse(err.to_string())
    }
}
