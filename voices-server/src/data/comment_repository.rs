use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) content: String,
}

#[derive(Debug, Clone)]
pub(crate) struct CommentWithAuthor {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) user_id: i64,
    pub(crate) user_name: String,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    async fn create_comment(&self, input: NewComment) -> Result<CommentWithAuthor, DomainError>;

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>, DomainError>;

    /// Author-gated delete in one statement. Returns the parent post id when
    /// a row was removed, `None` when the comment is missing or not owned by
    /// the requester.
    async fn delete_comment_owned(
        &self,
        comment_id: i64,
        author_id: i64,
    ) -> Result<Option<i64>, DomainError>;

    async fn count_by_user(&self, user_id: i64) -> Result<i64, DomainError>;
}
