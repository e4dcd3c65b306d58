use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, recent_posts, toggle_like, trending_posts, update_post,
    upload_image, user_posts,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post))
        .route("/recent", get(recent_posts))
        .route("/trending", get(trending_posts))
        .route("/user", get(user_posts))
        .route("/toggle_like", post(toggle_like))
        .route("/upload_image", post(upload_image))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}
