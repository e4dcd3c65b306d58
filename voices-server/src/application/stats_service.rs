use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PlatformStats {
    pub(crate) total_posts: i64,
    pub(crate) total_institutions: i64,
    pub(crate) total_users: i64,
}

pub(crate) struct StatsService<P: PostRepository, U: UserRepository> {
    posts: P,
    users: U,
}

impl<P: PostRepository, U: UserRepository> StatsService<P, U> {
    pub(crate) fn new(posts: P, users: U) -> Self {
        Self { posts, users }
    }

    pub(crate) async fn platform_stats(&self) -> Result<PlatformStats, DomainError> {
        let post_stats = self.posts.platform_stats().await?;
        let total_users = self.users.total_users().await?;

        Ok(PlatformStats {
            total_posts: post_stats.total_posts,
            total_institutions: post_stats.total_institutions,
            total_users,
        })
    }
}
