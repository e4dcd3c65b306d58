use thiserror::Error;

/// Errors returned by the `voices-client` library.
#[derive(Debug, Error)]
pub enum VoicesClientError {
    /// HTTP transport error (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requester is not allowed to touch the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was malformed or failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias for `voices-client` operations.
pub type VoicesClientResult<T> = Result<T, VoicesClientError>;

impl VoicesClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
