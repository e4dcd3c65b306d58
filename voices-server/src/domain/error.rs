use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Incorrect email or password. Please try again.")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    CurrentPasswordMismatch,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
