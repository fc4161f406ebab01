use thiserror::Error;

use crate::proxy::upstream::UpstreamError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}
pub type AppResult<T> = Result<T, AppError>;

// Failures on the /api/chat path. Mapped to HTTP in proxy::handlers::errors.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("API key is not configured")]
    ConfigurationMissing,

    #[error("{0}")]
    Upstream(#[from] UpstreamError),

    #[error("model returned no text: {0}")]
    EmptyCompletion(String),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

pub type ChatResult<T> = Result<T, ChatError>;
