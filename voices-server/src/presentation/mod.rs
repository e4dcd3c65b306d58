use sqlx::PgPool;
use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::application::stats_service::StatsService;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::media::store::MediaStore;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository, PostgresCommentRepository>>,
    pub(crate) comment_service: Arc<CommentService<PostgresCommentRepository>>,
    pub(crate) stats_service: Arc<StatsService<PostgresPostRepository, PostgresUserRepository>>,
    pub(crate) media: Arc<MediaStore>,
}

impl AppState {
    pub(crate) fn new(pool: PgPool, media: MediaStore) -> Self {
        let users = PostgresUserRepository::new(pool.clone());
        let posts = PostgresPostRepository::new(pool.clone());
        let comments = PostgresCommentRepository::new(pool);

        Self {
            auth_service: Arc::new(AuthService::new(users.clone())),
            post_service: Arc::new(PostService::new(posts.clone(), comments.clone())),
            comment_service: Arc::new(CommentService::new(comments)),
            stats_service: Arc::new(StatsService::new(posts, users)),
            media: Arc::new(media),
        }
    }
}
