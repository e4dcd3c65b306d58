pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;

use crate::domain::error::DomainError;

pub(super) fn map_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

pub(super) fn fk_violation_constraint(err: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = err
        && db_err.code().as_deref() == Some("23503")
    {
        return Some(db_err.constraint().unwrap_or("").to_string());
    }
    None
}
