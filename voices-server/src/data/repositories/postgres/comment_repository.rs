use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{fk_violation_constraint, map_db_error};
use crate::data::comment_repository::{CommentRepository, CommentWithAuthor, NewComment};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    user_id: i64,
    user_name: String,
}

impl From<CommentRow> for CommentWithAuthor {
    fn from(row: CommentRow) -> Self {
        CommentWithAuthor {
            id: row.id,
            post_id: row.post_id,
            content: row.content,
            created_at: row.created_at,
            user_id: row.user_id,
            user_name: row.user_name,
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<CommentWithAuthor, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (post_id, user_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, post_id, user_id, content, created_at
            )
            SELECT i.id, i.post_id, i.content, i.created_at, i.user_id, u.name AS user_name
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(input.post_id)
        .bind(input.user_id)
        .bind(&input.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match fk_violation_constraint(&err) {
            Some(constraint) if constraint.contains("user_id") => {
                DomainError::NotFound("user".to_string())
            }
            Some(_) => DomainError::NotFound("post".to_string()),
            None => map_db_error(err),
        })?;

        Ok(row.into())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.content, c.created_at, c.user_id, u.name AS user_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    async fn delete_comment_owned(
        &self,
        comment_id: i64,
        author_id: i64,
    ) -> Result<Option<i64>, DomainError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM comments
            WHERE id = $1 AND user_id = $2
            RETURNING post_id
            "#,
        )
        .bind(comment_id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn count_by_user(&self, user_id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
