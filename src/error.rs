use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream generation error: {0}")]
    UpstreamGeneration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoryError {
    /// HTTP status reported at the service boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoryError::NotFound(_) => StatusCode::NOT_FOUND,
            StoryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Folds transport and decoding failures of a completion call into
    /// `UpstreamGeneration`; other kinds pass through.
    pub fn into_upstream(self) -> Self {
        match self {
            StoryError::Http(e) => StoryError::UpstreamGeneration(e.to_string()),
            StoryError::Json(e) => StoryError::UpstreamGeneration(e.to_string()),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;
