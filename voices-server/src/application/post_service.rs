use crate::data::comment_repository::{CommentRepository, CommentWithAuthor};
use crate::data::post_repository::{
    LikeToggle, NewPost, PostPatch, PostRepository, PostSummary, PostWithAuthor,
};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest, images_to_column};

const DEFAULT_FEED_LIMIT: i64 = 3;
const MAX_FEED_LIMIT: i64 = 50;

/// One post with everything the detail view renders.
#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) post: PostWithAuthor,
    pub(crate) likes: i64,
    pub(crate) user_liked: bool,
    pub(crate) comments: Vec<CommentWithAuthor>,
}

pub(crate) struct PostService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
}

impl<P: PostRepository, C: CommentRepository> PostService<P, C> {
    pub(crate) fn new(posts: P, comments: C) -> Self {
        Self { posts, comments }
    }

    pub(crate) async fn create_post(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<i64, DomainError> {
        let req = req.validate()?;
        let images_json = images_to_column(&req.images)?;

        self.posts
            .create_post(NewPost {
                user_id,
                title: req.title,
                content: req.content,
                category: req.category,
                institution: req.institution,
                images_json,
            })
            .await
    }

    pub(crate) async fn get_post(
        &self,
        post_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .get_post_with_author(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post not found".to_string()))?;

        let likes = self.posts.likes_count(post_id).await?;
        let user_liked = match viewer_id {
            Some(viewer_id) => self.posts.user_liked(post_id, viewer_id).await?,
            None => false,
        };
        let comments = self.comments.list_for_post(post_id).await?;

        Ok(PostDetail {
            post,
            likes,
            user_liked,
            comments,
        })
    }

    pub(crate) async fn recent_posts(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<PostSummary>, DomainError> {
        self.posts.list_recent(clamp_limit(limit)).await
    }

    pub(crate) async fn trending_posts(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<PostSummary>, DomainError> {
        self.posts.list_trending(clamp_limit(limit)).await
    }

    pub(crate) async fn user_posts(&self, user_id: i64) -> Result<Vec<PostSummary>, DomainError> {
        self.posts.list_by_user(user_id).await
    }

    pub(crate) async fn user_post_count(&self, user_id: i64) -> Result<i64, DomainError> {
        self.posts.count_by_user(user_id).await
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<PostDetail, DomainError> {
        let req = req.validate()?;
        let images_json = images_to_column(&req.images)?;

        let updated = self
            .posts
            .update_post_owned(
                post_id,
                actor_user_id,
                PostPatch {
                    title: req.title,
                    content: req.content,
                    category: req.category,
                    institution: req.institution,
                    images_json,
                },
            )
            .await?;

        if !updated {
            return Err(DomainError::Forbidden(
                "You don't have permission to update this post or the post doesn't exist"
                    .to_string(),
            ));
        }

        self.get_post(post_id, Some(actor_user_id)).await
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let deleted = self.posts.delete_post_owned(post_id, actor_user_id).await?;
        if !deleted {
            return Err(DomainError::Forbidden(
                "You don't have permission to delete this post or the post doesn't exist"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) async fn toggle_like(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> Result<LikeToggle, DomainError> {
        self.posts.toggle_like(post_id, user_id).await
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(limit) if limit > 0 => limit.min(MAX_FEED_LIMIT),
        _ => DEFAULT_FEED_LIMIT,
    }
}
