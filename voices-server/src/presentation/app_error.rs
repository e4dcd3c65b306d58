use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;
use crate::media::store::MediaError;

/// What clients see when the failure is ours, not theirs. The real cause
/// only goes to the log.
const GENERIC_SERVER_ERROR: &str = "A server error occurred. Please try again later.";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::AlreadyExists(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::InvalidCredentials | DomainError::CurrentPasswordMismatch => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(error = %detail, "request failed with a database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GENERIC_SERVER_ERROR.to_string(),
                    )
                }
            },
            AppError::Media(err) => match &err {
                MediaError::InvalidExtension | MediaError::InvalidMime | MediaError::TooLarge => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                MediaError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                MediaError::InvalidPath => (StatusCode::FORBIDDEN, err.to_string()),
                MediaError::Io(detail) => {
                    error!(error = %detail, "request failed with a storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GENERIC_SERVER_ERROR.to_string(),
                    )
                }
            },
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => {
                error!(error = %err, "request failed unexpectedly");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_SERVER_ERROR.to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn duplicate_email_maps_to_bad_request() {
        let response =
            AppError::from(DomainError::AlreadyExists("Email already exists".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_credentials_map_to_unauthorized() {
        let response = AppError::from(DomainError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn ownership_mismatch_maps_to_forbidden() {
        let response =
            AppError::from(DomainError::Forbidden("nope".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unexpected_errors_are_sanitized() {
        let response =
            AppError::from(DomainError::Unexpected("connection refused".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
