use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    Chromium(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("element not interactable: {0}")]
    ElementNotInteractable(String),

    #[error("assertion failed: expected {expected}, observed {observed}")]
    Assertion { expected: String, observed: String },

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid mock pattern: {0}")]
    InvalidPattern(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
