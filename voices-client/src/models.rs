use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A registered account, password fields stripped.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Account id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}

/// The author reference embedded in posts and comments.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    /// Account id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// One comment with its author.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Comment id.
    pub id: i64,
    /// Comment body.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
    /// Who wrote it.
    pub user: Author,
}

/// Full post detail as rendered on the post page.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDetail {
    /// Post id.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Story body.
    pub content: String,
    /// Category tag.
    pub category: String,
    /// Institution tag.
    pub institution: String,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
    /// Public image URLs.
    pub images: Vec<String>,
    /// Support count.
    pub likes: i64,
    /// Whether the viewing user supports this post.
    pub user_liked: bool,
    /// Post owner.
    pub user: Author,
    /// Comments, oldest first.
    pub comments: Vec<Comment>,
}

/// Feed/list projection of a post.
#[derive(Debug, Clone, Deserialize)]
pub struct PostSummary {
    /// Post id.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Story body.
    pub content: String,
    /// Category tag.
    pub category: String,
    /// Institution tag.
    pub institution: String,
    /// Public image URLs.
    pub images: Vec<String>,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
    /// Post owner.
    pub user: Author,
    /// Support count.
    pub likes_count: i64,
    /// Comment count.
    pub comments_count: i64,
}

/// Result of toggling support on a post.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LikeToggle {
    /// Whether the post is supported after the toggle.
    pub liked: bool,
    /// Fresh support count.
    pub likes_count: i64,
}

/// Platform-wide counters shown on the landing page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlatformStats {
    /// Published posts.
    pub total_posts: i64,
    /// Distinct institutions posted about.
    pub total_institutions: i64,
    /// Registered users.
    pub total_users: i64,
}

/// Fields for creating or replacing a post.
#[derive(Debug, Clone)]
pub struct PostInput {
    /// Headline.
    pub title: String,
    /// Story body.
    pub content: String,
    /// Category tag.
    pub category: String,
    /// Institution tag.
    pub institution: String,
    /// Image paths, usually returned by `upload_image`.
    pub images: Vec<String>,
}
