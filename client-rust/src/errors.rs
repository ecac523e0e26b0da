use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered 404.
    #[error("Resource not found")]
    NotFound,
    /// The backend rejected the payload (400). Carries the backend's message
    /// when one was supplied.
    #[error("{0}")]
    BadRequest(String),
    /// The backend answered with a 5xx status.
    #[error("Server error. Please try again later.")]
    ServerUnavailable,
    /// Any other non-success status, passed through unmapped.
    #[error("Status error: {1} (Status {0})")]
    Status(reqwest::StatusCode, String),
    /// The request could not be sent, timed out, or the response body could
    /// not be decoded.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The response or a test double did not behave as the caller expected.
    #[error("Invariant: {0}")]
    Invariant(String),
}

impl ApiError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
