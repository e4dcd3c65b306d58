use axum::Router;
use axum::routing::get;

use super::AppState;
use super::handlers::stats::platform_stats;

pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod media;
pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/posts", posts::router())
        .nest("/api/comments", comments::router())
        .merge(media::router())
        .route("/api/stats", get(platform_stats))
}
