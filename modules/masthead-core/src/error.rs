use thiserror::Error;

pub type Result<T> = std::result::Result<T, MastheadError>;

#[derive(Error, Debug)]
pub enum MastheadError {
    #[error("Content source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
