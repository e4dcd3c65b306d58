use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) images_json: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) images_json: Option<String>,
}

/// One post joined with its owner, images already decoded and normalized.
#[derive(Debug, Clone)]
pub(crate) struct PostWithAuthor {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) user_name: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) images: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Feed/list projection: a post plus its engagement counters.
#[derive(Debug, Clone)]
pub(crate) struct PostSummary {
    pub(crate) post: PostWithAuthor,
    pub(crate) likes_count: i64,
    pub(crate) comments_count: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LikeToggle {
    pub(crate) liked: bool,
    pub(crate) likes_count: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PostStats {
    pub(crate) total_posts: i64,
    pub(crate) total_institutions: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<i64, DomainError>;

    async fn get_post_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, DomainError>;

    async fn list_recent(&self, limit: i64) -> Result<Vec<PostSummary>, DomainError>;

    /// Rank by like count (ties broken by recency), then re-fetch the winners
    /// as full summaries preserving rank order.
    async fn list_trending(&self, limit: i64) -> Result<Vec<PostSummary>, DomainError>;

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<PostSummary>, DomainError>;

    async fn count_by_user(&self, user_id: i64) -> Result<i64, DomainError>;

    /// Ownership check and mutation in one statement: zero rows means the
    /// post is missing or owned by someone else.
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<bool, DomainError>;

    /// Single atomic delete; comments and likes go with the post via the
    /// cascading foreign keys.
    async fn delete_post_owned(&self, post_id: i64, owner_id: i64) -> Result<bool, DomainError>;

    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeToggle, DomainError>;

    async fn likes_count(&self, post_id: i64) -> Result<i64, DomainError>;

    async fn user_liked(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError>;

    async fn platform_stats(&self) -> Result<PostStats, DomainError>;
}
